pub(crate) mod empty_state;
pub(crate) mod error_banner;
pub(crate) mod field;
pub(crate) mod locale_menu;
pub(crate) mod shell;
