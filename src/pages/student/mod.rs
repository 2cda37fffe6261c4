//! Student Portal

mod browse;
mod checkout;
mod flashcards;
mod library;
mod playlists;
mod requests;

pub use browse::BrowsePage;
pub use checkout::CheckoutPage;
pub use flashcards::FlashcardsPage;
pub use library::LibraryPage;
pub use playlists::PlaylistsPage;
pub use requests::MyRequestsPage;
