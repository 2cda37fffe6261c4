//! UI Components
//!
//! Reusable Leptos components shared by the portal pages.

mod delete_confirm_button;
mod fatal_error;
mod fields;
mod material_card;
mod nav_bar;
mod pagination_bar;
mod status_toggle;
mod toast;

pub use delete_confirm_button::DeleteConfirmButton;
pub use fatal_error::FatalError;
pub use fields::{
    FilePicker, OptionSelect, RequestStatusSelect, ResetButton, StatusSelect, TextArea, TextField,
};
pub use material_card::MaterialCard;
pub use nav_bar::NavBar;
pub use pagination_bar::PaginationBar;
pub use status_toggle::StatusToggleButton;
pub use toast::{ToastHost, Toaster};
