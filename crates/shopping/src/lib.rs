pub mod aggregation;
pub mod branding;
pub mod error;
pub mod font;
pub mod layout;
pub mod line;
pub mod pdf;

pub use aggregation::IngredientAggregationService;
pub use branding::{Branding, PAGE_SIZE};
pub use error::{InvalidLineError, RenderingUnavailableError, ShoppingListError};
pub use font::FontProgram;
pub use layout::{Page, Row, ShoppingListDocument};
pub use line::{AMOUNT_MAX, AMOUNT_MIN, AggregatedLine, IngredientLine};
pub use pdf::{
    MAX_FONT_SIZE, MAX_PAGE_SIZE, MAX_TITLE_FONT_SIZE, MIN_FONT_SIZE, ShoppingListRenderer,
};

pub const CONTENT_TYPE: &str = "application/pdf";

/// Aggregate the cart lines and render them as a downloadable PDF.
pub fn generate_shopping_list_document(
    lines: &[IngredientLine],
    requester_name: &str,
    renderer: &ShoppingListRenderer,
) -> Result<Vec<u8>, ShoppingListError> {
    let aggregated = IngredientAggregationService::aggregate(lines)?;
    let bytes = renderer.render(&aggregated, requester_name)?;

    Ok(bytes)
}

/// File name announced in the `Content-Disposition` header.
pub fn attachment_filename(requester_name: &str) -> String {
    format!("{requester_name}_shopping_cart.pdf")
}
