use std::path::PathBuf;

use serde::Deserialize;

use crate::{
    error::RenderingUnavailableError,
    pdf::{MAX_FONT_SIZE, MAX_PAGE_SIZE, MAX_TITLE_FONT_SIZE, MIN_FONT_SIZE},
};

pub const PAGE_SIZE: usize = 6;

/// Static texts and typography of the shopping list document.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Branding {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_header_text")]
    pub header_text: String,
    #[serde(default = "default_footer_text")]
    pub footer_text: String,
    #[serde(default = "default_ingredient_caption")]
    pub ingredient_caption: String,
    #[serde(default = "default_quantity_caption")]
    pub quantity_caption: String,
    #[serde(default = "default_empty_text")]
    pub empty_text: String,
    /// TrueType font embedded in the document, relative to the working directory
    #[serde(default = "default_font_path")]
    pub font_path: PathBuf,
    /// Face for the title and the column captions, the regular font when unset
    #[serde(default)]
    pub bold_font_path: Option<PathBuf>,
    #[serde(default = "default_font_size")]
    pub font_size: u16,
    #[serde(default = "default_title_font_size")]
    pub title_font_size: u16,
    /// Maximum number of table rows per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Branding {
    /// Rejects sizes that would push text outside the A4 page.
    pub fn check_layout(&self) -> Result<(), RenderingUnavailableError> {
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(RenderingUnavailableError::new(format!(
                "page size must be between 1 and {MAX_PAGE_SIZE} rows, got {}",
                self.page_size
            )));
        }

        if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&self.font_size) {
            return Err(RenderingUnavailableError::new(format!(
                "font size must be between {MIN_FONT_SIZE} and {MAX_FONT_SIZE}, got {}",
                self.font_size
            )));
        }

        if !(MIN_FONT_SIZE..=MAX_TITLE_FONT_SIZE).contains(&self.title_font_size) {
            return Err(RenderingUnavailableError::new(format!(
                "title font size must be between {MIN_FONT_SIZE} and {MAX_TITLE_FONT_SIZE}, got {}",
                self.title_font_size
            )));
        }

        if self.font_path.as_os_str().is_empty() {
            return Err(RenderingUnavailableError::new("font path is empty"));
        }

        Ok(())
    }
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            title: default_title(),
            header_text: default_header_text(),
            footer_text: default_footer_text(),
            ingredient_caption: default_ingredient_caption(),
            quantity_caption: default_quantity_caption(),
            empty_text: default_empty_text(),
            font_path: default_font_path(),
            bold_font_path: None,
            font_size: default_font_size(),
            title_font_size: default_title_font_size(),
            page_size: default_page_size(),
        }
    }
}

fn default_title() -> String {
    "Shopping List".to_string()
}

fn default_header_text() -> String {
    "Foodgram".to_string()
}

fn default_footer_text() -> String {
    "FoodGram @ 2024".to_string()
}

fn default_ingredient_caption() -> String {
    "Ingredient".to_string()
}

fn default_quantity_caption() -> String {
    "Quantity".to_string()
}

fn default_empty_text() -> String {
    "No items in your shopping cart".to_string()
}

fn default_font_path() -> PathBuf {
    PathBuf::from("assets/fonts/DejaVuSans.ttf")
}

fn default_font_size() -> u16 {
    12
}

fn default_title_font_size() -> u16 {
    18
}

fn default_page_size() -> usize {
    PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_layout_page_size_bounds() {
        let branding = |page_size| Branding {
            page_size,
            ..Branding::default()
        };

        assert!(branding(1).check_layout().is_ok());
        assert!(branding(MAX_PAGE_SIZE).check_layout().is_ok());
        assert!(branding(0).check_layout().is_err());
        assert!(branding(MAX_PAGE_SIZE + 1).check_layout().is_err());
        assert!(branding(40).check_layout().is_err());
    }

    #[test]
    fn test_check_layout_font_sizes() {
        let oversized = Branding {
            font_size: MAX_FONT_SIZE + 1,
            ..Branding::default()
        };
        assert!(oversized.check_layout().is_err());

        let oversized_title = Branding {
            title_font_size: MAX_TITLE_FONT_SIZE + 1,
            ..Branding::default()
        };
        assert!(oversized_title.check_layout().is_err());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let branding: Branding = serde_json::from_str(r#"{"title": "Список покупок"}"#).unwrap();

        assert_eq!(branding.title, "Список покупок");
        assert_eq!(branding.page_size, PAGE_SIZE);
        assert_eq!(branding.font_path, PathBuf::from("assets/fonts/DejaVuSans.ttf"));
        assert_eq!(branding.bold_font_path, None);
    }
}
