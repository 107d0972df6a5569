pub mod auth;
mod json;
pub mod photos;
pub mod recipes;
pub mod testing;

pub use json::JsonBody;

use cookbook_core::{
    Ingredient, Instruction, LegacyIngredient, LegacyInstruction, LegacyRecipe, ScaledIngredient,
    Unit,
};
use serde::Serialize;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{OpenApi, ToSchema};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Base spec with shared components and security
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Cookbook API", description = "Personal recipe collection with serving-size scaling"),
        components(schemas(
            ErrorResponse,
            Ingredient,
            Instruction,
            Unit,
            ScaledIngredient,
            LegacyRecipe,
            LegacyIngredient,
            LegacyInstruction,
        ))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    if let Some(components) = spec.components.as_mut() {
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }

    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        auth::ApiDoc::openapi(),
        testing::ApiDoc::openapi(),
        photos::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}
