pub use self::admissions::Admissions;
pub use self::applications::Applications;
pub use self::store::StudentStore;
pub use self::student::{PREFERENCES, Student, StudentRow};
pub use self::university::{University, UniversityId};

mod admissions;
mod applications;
mod store;
mod student;
mod university;
