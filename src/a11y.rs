// Accessibility helpers

/// Get CSS for visible focus indicators and screen reader utilities.
///
/// Returns critical accessibility CSS injected during bootstrap: focus
/// ring, screen reader helper class, and the skip link's parked and
/// focused positions.
#[must_use]
pub const fn critical_css() -> &'static str {
    ":focus{outline:3px solid #2563EB;outline-offset:2px} \
     .sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;} \
     .skip-link{position:absolute;left:-999px;top:0;z-index:100;background:#fff;color:#111;padding:8px 16px;} \
     .skip-link:focus{left:8px}"
}
