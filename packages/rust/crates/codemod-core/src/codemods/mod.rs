//! Built-in codemods.
//!
//! | id                                 | risk               | eligibility          |
//! |------------------------------------|--------------------|----------------------|
//! | `remove-unnecessary-f-str`         | AUTO_FIX           | always               |
//! | `django-session-cookie-secure-off` | MERGE_AFTER_REVIEW | always               |
//! | `limit-readline`                   | AUTO_FIX           | `limit-readline.yaml`|

mod django_session_cookie_secure_off;
mod limit_readline;
mod remove_unnecessary_f_str;

use std::sync::Arc;

pub use django_session_cookie_secure_off::DjangoSessionCookieSecureOff;
pub use limit_readline::LimitReadline;
pub use remove_unnecessary_f_str::RemoveUnnecessaryFStr;

use crate::codemod::Codemod;
use crate::error::RegistryError;
use crate::registry::CodemodRegistry;

/// Every built-in codemod, in registration order.
#[must_use]
pub fn builtin_codemods() -> Vec<Arc<dyn Codemod>> {
    vec![
        Arc::new(DjangoSessionCookieSecureOff::new()),
        Arc::new(LimitReadline::new()),
        Arc::new(RemoveUnnecessaryFStr::new()),
    ]
}

/// Closed registry holding the built-in codemods.
///
/// # Errors
///
/// `DuplicateRuleId` if two built-ins share an id.
pub fn default_registry() -> Result<CodemodRegistry, RegistryError> {
    let mut registry = CodemodRegistry::new();
    for codemod in builtin_codemods() {
        registry.register(codemod)?;
    }
    registry.close();
    Ok(registry)
}
