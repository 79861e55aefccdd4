//! Centralized constants for the browser crate
//!
//! Element ids, class names and event names shared by the DOM glue.

// =============================================================================
// Fallback banner
// =============================================================================

/// Id of the banner shown when the graphics context cannot be created
pub const FALLBACK_BANNER_ID: &str = "backdrop-fallback";

/// Inline style of the fallback banner: fixed to the top, above content
pub const FALLBACK_BANNER_STYLE: &str = "position:fixed;top:0;left:0;right:0;\
z-index:1000;padding:0.75rem 1rem;background:#7b2ff7;color:#ffffff;\
font:14px/1.4 system-ui,sans-serif;text-align:center;";

// =============================================================================
// Event names
// =============================================================================

pub const EVENT_RESIZE: &str = "resize";
pub const EVENT_POINTER_MOVE: &str = "pointermove";
pub const EVENT_PAGE_HIDE: &str = "pagehide";
pub const EVENT_PAGE_SHOW: &str = "pageshow";
pub const EVENT_CLICK: &str = "click";

// =============================================================================
// Page shell
// =============================================================================

/// Selector for in-page anchors that scroll smoothly
pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

/// Navigation toggle button and the menu it opens
pub const NAV_TOGGLE_SELECTOR: &str = "[data-nav-toggle]";
pub const NAV_MENU_SELECTOR: &str = "[data-nav-menu]";
pub const NAV_OPEN_CLASS: &str = "is-open";

/// Elements whose text is replaced by the current year
pub const YEAR_SELECTOR: &str = "[data-current-year]";
