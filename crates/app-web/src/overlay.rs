use wasm_bindgen::JsValue;
use web_sys as web;

use crate::constants::{WAVE_STAGGER_MS, WELCOME_TEXT_ID};

/// Rebuild the welcome element's text as one `span.wave` per word with a
/// staggered animation delay, so the CSS wave animation ripples word by word.
/// A page without the element just skips the effect.
pub fn init_welcome_text(document: &web::Document) -> Result<(), JsValue> {
    let Some(el) = document.get_element_by_id(WELCOME_TEXT_ID) else {
        log::warn!("missing #{WELCOME_TEXT_ID}; skipping welcome text");
        return Ok(());
    };

    let text = el.text_content().unwrap_or_default();
    let words: Vec<&str> = text.split_whitespace().collect();
    el.set_text_content(None);

    for (i, word) in words.iter().enumerate() {
        let span = document.create_element("span")?;
        span.set_class_name("wave");
        span.set_text_content(Some(word));
        let delay_ms = i as u32 * WAVE_STAGGER_MS;
        span.set_attribute("style", &format!("animation-delay: {delay_ms}ms"))?;
        el.append_child(&span)?;
        if i + 1 < words.len() {
            let space = document.create_text_node(" ");
            el.append_child(&space)?;
        }
    }
    Ok(())
}
