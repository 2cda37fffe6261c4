//! Admin Portal

mod courses;
mod material_types;
mod materials;
mod requests;
mod students;
mod subjects;

pub use courses::CoursesPage;
pub use material_types::MaterialTypesPage;
pub use materials::MaterialsPage;
pub use requests::RequestsPage;
pub use students::StudentsPage;
pub use subjects::SubjectsPage;
