//! Expression parameters and expression menus of an avatar.

pub mod menu;
pub mod parameters;

pub use menu::{Control, ExpressionMenu, ExpressionMenus, MenuId, MenuLocation, MENU_CAPACITY};
pub use parameters::{
    ExpressionParameter, ExpressionParameters, ExpressionValueKind, DEFAULT_PARAMETER_SLOTS,
};
