//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Notes API",
        version = "0.1.0",
        description = "User directory for the notes application (MongoDB)",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/users", api = domain_users::ApiDoc)
    ),
    tags(
        (name = "Users", description = "User management endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_users_paths_are_nested_under_api() {
        let doc = ApiDoc::openapi();
        let users = doc
            .paths
            .paths
            .get("/api/users")
            .expect("users path documented");

        assert!(users.get.is_some());
        assert!(users.post.is_some());
        assert!(users.patch.is_some());
        assert!(users.delete.is_some());
    }

    #[test]
    fn test_user_schemas_are_registered() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().unwrap().schemas;

        assert!(schemas.contains_key("UserResponse"));
        assert!(schemas.contains_key("CreateUser"));
        assert!(!schemas.contains_key("User"));
    }
}
