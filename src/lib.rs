//! Root crate facade for the Contactbook API server.

pub use contactbook_server::{
    config, create_app, db, error, handlers, models, query, resolve_bind_address, response,
    serve_router, AppError, AppState, Config, ContactService, ContactStore, StorageBackend,
};
