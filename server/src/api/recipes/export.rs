use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::Ingredient;
use crate::schema::recipes;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use diesel::prelude::*;
use forkful_core::ingredients_from_value;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::sync::Arc;
use uuid::Uuid;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const LINE_HEIGHT_MM: f32 = 8.0;

/// Build the printable lines for a recipe: title, then one
/// "amount unit name" line per ingredient, in stored order.
fn recipe_pdf_lines(title: &str, ingredients: &[Ingredient]) -> Vec<String> {
    let mut lines = Vec::with_capacity(ingredients.len() + 2);
    lines.push(format!("Recipe: {}", title));
    lines.push("Ingredients:".to_string());
    for i in ingredients {
        lines.push(format!("{} {} {}", i.amount, i.unit, i.name));
    }
    lines
}

/// Render lines to a single-column PDF, flowing onto new pages as needed.
fn render_pdf(title: &str, lines: &[String]) -> Result<Vec<u8>, String> {
    let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "recipe");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| e.to_string())?;

    let mut current = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

    for line in lines {
        if y < MARGIN_MM {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "recipe");
            current = doc.get_page(page).get_layer(layer);
            y = PAGE_HEIGHT_MM - MARGIN_MM;
        }
        current.use_text(line.clone(), 12.0, Mm(MARGIN_MM), Mm(y), &font);
        y -= LINE_HEIGHT_MM;
    }

    doc.save_to_bytes().map_err(|e| e.to_string())
}

fn sanitize_filename(title: &str) -> String {
    let name: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '-' || *c == '_')
        .collect();
    if name.trim().is_empty() {
        "recipe".to_string()
    } else {
        name
    }
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/export",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Printable recipe PDF", content_type = "application/pdf"),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn export_recipe(
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let (title, ingredients_json): (String, serde_json::Value) = match recipes::table
        .filter(recipes::id.eq(id))
        .filter(recipes::deleted_at.is_null())
        .select((recipes::title, recipes::ingredients))
        .first(&mut conn)
    {
        Ok(r) => r,
        Err(diesel::NotFound) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Recipe not found".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to fetch recipe: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    let ingredients = match ingredients_from_value(ingredients_json) {
        Ok(i) => i,
        Err(e) => {
            tracing::error!("Corrupt ingredient data for recipe {}: {}", id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Recipe ingredient data is corrupted".to_string(),
                }),
            )
                .into_response();
        }
    };

    let lines = recipe_pdf_lines(&title, &ingredients);
    let data = match render_pdf(&title, &lines) {
        Ok(d) => d,
        Err(e) => {
            tracing::error!("Failed to render PDF for recipe {}: {}", id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to render PDF".to_string(),
                }),
            )
                .into_response();
        }
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}.pdf\"", sanitize_filename(&title)),
        )
        .body(Body::from(data))
        .unwrap()
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(name: &str, amount: f64, unit: &str) -> Ingredient {
        Ingredient {
            name: name.to_string(),
            amount,
            unit: unit.to_string(),
            calories: None,
        }
    }

    #[test]
    fn test_lines_preserve_ingredient_order() {
        let lines = recipe_pdf_lines(
            "Pancakes",
            &[ingredient("flour", 250.0, "g"), ingredient("egg", 2.0, "piece")],
        );
        assert_eq!(
            lines,
            vec![
                "Recipe: Pancakes".to_string(),
                "Ingredients:".to_string(),
                "250 g flour".to_string(),
                "2 piece egg".to_string(),
            ]
        );
    }

    #[test]
    fn test_lines_for_empty_ingredient_list() {
        let lines = recipe_pdf_lines("Water", &[]);
        assert_eq!(lines, vec!["Recipe: Water", "Ingredients:"]);
    }

    #[test]
    fn test_sanitize_filename_strips_specials() {
        assert_eq!(sanitize_filename("Mac & Cheese!"), "Mac  Cheese");
        assert_eq!(sanitize_filename("weeknight-stir_fry"), "weeknight-stir_fry");
    }

    #[test]
    fn test_sanitize_filename_falls_back_for_empty() {
        assert_eq!(sanitize_filename("???"), "recipe");
    }

    #[test]
    fn test_render_pdf_produces_bytes() {
        let lines = recipe_pdf_lines("Pancakes", &[ingredient("flour", 250.0, "g")]);
        let data = render_pdf("Pancakes", &lines).unwrap();
        assert!(data.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_pdf_handles_many_lines() {
        // More lines than fit on one A4 page
        let lines: Vec<String> = (0..100).map(|i| format!("line {i}")).collect();
        let data = render_pdf("Long", &lines).unwrap();
        assert!(data.starts_with(b"%PDF"));
    }
}
