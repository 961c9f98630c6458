use std::sync::Arc;

use crate::db::OrmConn;

#[derive(Clone)]
pub struct AppState {
    pub orm: Arc<OrmConn>,
    pub jwt_secret: String,
}

impl AppState {
    pub fn new(orm: OrmConn, jwt_secret: impl Into<String>) -> Self {
        Self {
            orm: Arc::new(orm),
            jwt_secret: jwt_secret.into(),
        }
    }

    pub fn db(&self) -> &OrmConn {
        self.orm.as_ref()
    }
}
