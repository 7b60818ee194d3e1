use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/:collection",
            get(handlers::collections::list_records).post(handlers::collections::create_record),
        )
        .route(
            "/:collection/:id",
            get(handlers::collections::get_record)
                .patch(handlers::collections::update_record)
                .delete(handlers::collections::delete_record),
        )
}
