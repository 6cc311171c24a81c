#[cfg(test)]
use crate::core::app::{App, SessionContext};
#[cfg(test)]
use crate::core::notebook::VocabItem;
#[cfg(test)]
use crate::ui::theme::Theme;

#[cfg(test)]
pub fn create_test_app() -> App {
    let session = SessionContext::new("http://api.test".to_string(), None)
        .expect("test session should build");
    App::new(session, Theme::dark_default())
}

#[cfg(test)]
pub fn vocab_item(english: &str, chinese: &str) -> VocabItem {
    VocabItem {
        english: english.to_string(),
        chinese: chinese.to_string(),
        example_en: format!("{english} example"),
        example_zh: format!("{chinese}例句"),
    }
}
