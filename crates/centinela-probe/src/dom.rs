//! Locator and visibility helpers over a chromiumoxide [`Page`].
//!
//! Queries run as injected page scripts so "visible" means what the user
//! sees: rendered geometry and computed style, not mere DOM presence.
//! Zero matching elements is a negative observation, not an error.

use crate::wait::WaitConfig;
use crate::{Error, Result};
use chromiumoxide::Page;
use std::time::Instant;

/// Shared prelude for the injected scripts: visibility test plus a scan
/// for the first visible leaf element containing a text needle.
const FINDER_PRELUDE: &str = r#"
    const visible = (el) => {
        const rect = el.getBoundingClientRect();
        const style = window.getComputedStyle(el);
        return rect.width > 0 && rect.height > 0
            && style.visibility !== 'hidden' && style.display !== 'none';
    };
    const leafWithText = (needle) => {
        for (const el of document.querySelectorAll('body *')) {
            if (el.children.length === 0
                && (el.textContent || '').includes(needle)
                && visible(el)) {
                return el;
            }
        }
        return null;
    };
"#;

/// Quote `text` as a JavaScript string literal.
fn js_string(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

async fn eval_bool(page: &Page, script: String) -> Result<bool> {
    let result = page.evaluate(script).await?;
    result
        .into_value::<bool>()
        .map_err(|e| Error::Evaluate(format!("expected a boolean: {e}")))
}

/// Whether any rendered, visible leaf element contains `text`.
pub async fn is_text_visible(page: &Page, text: &str) -> Result<bool> {
    let script = format!(
        "(() => {{ {FINDER_PRELUDE} return leafWithText({}) !== null; }})()",
        js_string(text)
    );
    eval_bool(page, script).await
}

/// Click the first visible leaf element containing `text`. Returns false
/// when no such element is on screen.
pub async fn click_text(page: &Page, text: &str) -> Result<bool> {
    let script = format!(
        "(() => {{ {FINDER_PRELUDE} \
            const el = leafWithText({}); \
            if (el === null) return false; \
            el.click(); \
            return true; }})()",
        js_string(text)
    );
    eval_bool(page, script).await
}

/// Click the first visible control of accessible role "button" whose
/// accessible name contains `name`.
pub async fn click_button(page: &Page, name: &str) -> Result<bool> {
    let script = format!(
        "(() => {{ {FINDER_PRELUDE} \
            const accessibleName = (el) => \
                (el.getAttribute('aria-label') || el.value || el.textContent || '').trim(); \
            for (const el of document.querySelectorAll(\
                'button, [role=\"button\"], input[type=\"submit\"]')) {{ \
                if (visible(el) && accessibleName(el).includes({})) {{ \
                    el.click(); \
                    return true; \
                }} \
            }} \
            return false; }})()",
        js_string(name)
    );
    eval_bool(page, script).await
}

/// Type `value` into the first password input on the page.
///
/// Unlike the text lookups, a missing input here is an error: this is only
/// called once the PIN prompt is known to be on screen.
pub async fn fill_password(page: &Page, value: &str) -> Result<()> {
    let input = page
        .find_element("input[type='password']")
        .await
        .map_err(|e| Error::Browser(format!("password input not found: {e}")))?;
    input.click().await?;
    input.type_str(value).await?;
    Ok(())
}

/// Poll until any of `needles` is visible, bounded by `config`.
pub async fn wait_until_any_visible(
    page: &Page,
    needles: &[&str],
    config: WaitConfig,
) -> Result<bool> {
    let deadline = Instant::now() + config.timeout;
    loop {
        for needle in needles {
            if is_text_visible(page, needle).await? {
                return Ok(true);
            }
        }
        if Instant::now() >= deadline {
            return Ok(false);
        }
        tokio::time::sleep(config.poll_interval).await;
    }
}
