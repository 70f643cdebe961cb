pub mod admin;

pub mod admission;

pub mod auth;

pub mod courses;

pub mod notifications;

pub mod payments;

pub mod system;

pub use admin::configure_admin_routes;
pub use admission::configure_admission_routes;
pub use auth::configure_auth_routes;
pub use courses::configure_course_routes;
pub use notifications::configure_notification_routes;
pub use payments::configure_payment_routes;
pub use system::configure_system_routes;

use actix_web::{Route, web};

use crate::middlewares;
use crate::models::admins::entities::AdminRole;

/// 后台人员路由：先校验会话，再校验角色
pub(crate) fn staff_route(route: Route, roles: &[&AdminRole]) -> Route {
    route
        .wrap(middlewares::RequireStaffRole::new_any(roles))
        .wrap(middlewares::RequireAdminSession)
}

/// 按顺序注册全部路由
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_system_routes)
        .configure(configure_auth_routes)
        .configure(configure_course_routes)
        .configure(configure_admission_routes)
        .configure(configure_payment_routes)
        .configure(configure_notification_routes)
        .configure(configure_admin_routes);
}
