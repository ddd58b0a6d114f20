//! Best-effort extraction of the four detail-page facets. Each facet is an
//! independent fallible lookup: a locator miss empties that facet only and
//! never touches its siblings.

pub mod facilities;
pub mod menu;
pub mod rating;
pub mod reviews;

use thirtyfour::WebDriver;

use crate::menu_text::MenuItem;

#[derive(Debug, Default)]
pub struct PlaceDetails {
    pub rating: Option<String>,
    pub menus: Vec<MenuItem>,
    pub facilities: Vec<String>,
    pub reviews: Vec<String>,
}

/// Run all four facets against the currently entered detail frame.
pub async fn extract_all(driver: &WebDriver) -> PlaceDetails {
    PlaceDetails {
        rating: rating::extract(driver).await,
        menus: menu::from_place_section(driver).await,
        facilities: facilities::extract(driver).await,
        reviews: reviews::extract(driver).await,
    }
}
