//! 预导入模块，方便使用

pub use super::admins::{ActiveModel as AdminActiveModel, Entity as Admins, Model as AdminModel};
pub use super::batches::{ActiveModel as BatchActiveModel, Entity as Batches, Model as BatchModel};
pub use super::courses::{
    ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel,
};
pub use super::enrollments::{
    ActiveModel as EnrollmentActiveModel, Entity as Enrollments, Model as EnrollmentModel,
};
pub use super::notes::{ActiveModel as NoteActiveModel, Entity as Notes, Model as NoteModel};
pub use super::notifications::{
    ActiveModel as NotificationActiveModel, Entity as Notifications, Model as NotificationModel,
};
pub use super::payments::{
    ActiveModel as PaymentActiveModel, Entity as Payments, Model as PaymentModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::course_tests::{ActiveModel as TestActiveModel, Entity as Tests, Model as TestModel};
pub use super::videos::{ActiveModel as VideoActiveModel, Entity as Videos, Model as VideoModel};
