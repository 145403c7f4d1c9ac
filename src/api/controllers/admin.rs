use std::sync::Arc;

use actix_web::{get, post, web::Data as State, web::Path};
use utoipa_actix_web::service_config::ServiceConfig;

use crate::api::dto::hotel::{FindHotelDTO, HotelForm, HotelView};
use crate::api::error::ApiResult;
use crate::api::middlewares::context::RequestContext;
use crate::api::middlewares::flash::FlashMessage;
use crate::api::middlewares::flow::proceed;
use crate::api::middlewares::upload::{Submission, push_media};
use crate::api::middlewares::validate::Form;
use crate::api::views::{View, redirect};
use crate::domain::error::AppError;
use crate::domain::models::hotel::HotelLookup;
use crate::domain::services::hotel::HotelService;
use crate::domain::services::media::MediaService;

const NO_MATCHES: &str = "No matches found!";

pub fn routes(cfg: &mut ServiceConfig) {
    cfg.service(admin_page)
        .service(add_get)
        .service(add_post)
        .service(edit_remove_get)
        .service(edit_remove_post)
        .service(update_get)
        .service(update_post)
        .service(delete_get)
        .service(delete_post);
}

#[utoipa::path(
    responses(
        (status = 200, description = "View `admin_page`"),
        (status = 302, description = "Not an admin, redirected to `/`")
    ),
    security(("session" = [])),
    tag = "Admin",
)]
#[get("")]
pub async fn admin_page(ctx: RequestContext) -> ApiResult {
    View::new("admin_page", "Admin").render(&ctx)
}

#[utoipa::path(
    responses(
        (status = 200, description = "View `admin_add`"),
        (status = 302, description = "Not an admin, redirected to `/`")
    ),
    security(("session" = [])),
    tag = "Admin",
)]
#[get("/add")]
pub async fn add_get(ctx: RequestContext) -> ApiResult {
    View::new("admin_add", "Admin - Add Hotel").render(&ctx)
}

#[utoipa::path(
    request_body(content = HotelForm, content_type = "multipart/form-data"),
    responses(
        (status = 302, description = "Created, redirected to the hotel details. Upload failures go back to the form"),
        (status = 400, body = AppError, example = json!(AppError::example_400())),
        (status = 422, body = AppError, example = json!(AppError::example_422())),
        (status = 500, body = AppError, example = json!(AppError::example_500()))
    ),
    security(("session" = [])),
    tag = "Admin",
)]
#[post("/add")]
pub async fn add_post(
    ctx: RequestContext,
    submission: Submission,
    hotel_service: State<Arc<dyn HotelService>>,
    media_service: State<Arc<dyn MediaService>>,
) -> ApiResult {
    let form = HotelForm::from_fields(&submission.fields)?;

    let submission = proceed!(
        push_media(
            submission,
            media_service.get_ref().as_ref(),
            &ctx.flash,
            "/admin/add"
        )
        .await?
    );

    let form = form.with_upload(&submission.fields);

    let hotel = hotel_service.create(form.into()).await?;

    ctx.flash.push(FlashMessage::success(format!(
        "{} added successfully!",
        hotel.name
    )))?;

    Ok(redirect(&format!("/all/{}/details", hotel.id)))
}

#[utoipa::path(
    responses(
        (status = 200, description = "View `edit_remove`"),
        (status = 302, description = "Not an admin, redirected to `/`")
    ),
    security(("session" = [])),
    tag = "Admin",
)]
#[get("/edit-remove")]
pub async fn edit_remove_get(ctx: RequestContext) -> ApiResult {
    View::new("edit_remove", "Admin - Edit Hotel").render(&ctx)
}

#[utoipa::path(
    request_body(content = FindHotelDTO, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, body = [HotelView], description = "View `hotel_detail` with every match"),
        (status = 302, description = "No match, redirected back to the form"),
        (status = 500, body = AppError, example = json!(AppError::example_500()))
    ),
    security(("session" = [])),
    tag = "Admin",
)]
#[post("/edit-remove")]
pub async fn edit_remove_post(
    ctx: RequestContext,
    payload: Form<FindHotelDTO>,
    hotel_service: State<Arc<dyn HotelService>>,
) -> ApiResult {
    let hotels = hotel_service
        .find_for_edit(HotelLookup::from(&*payload))
        .await?;

    if hotels.is_empty() {
        ctx.flash.push(NO_MATCHES)?;
        return Ok(redirect("/admin/edit-remove"));
    }

    View::new("hotel_detail", "Admin - Edit Hotel")
        .with("hotels", &HotelView::list(&hotels))?
        .render(&ctx)
}

#[utoipa::path(
    params(("hotel_id" = String, Path, description = "Hotel id")),
    responses(
        (status = 200, body = HotelView, description = "View `admin_add` prefilled with the hotel"),
        (status = 500, body = AppError, example = json!(AppError::example_500()))
    ),
    security(("session" = [])),
    tag = "Admin",
)]
#[get("/{hotel_id}/update")]
pub async fn update_get(
    ctx: RequestContext,
    hotel_id: Path<String>,
    hotel_service: State<Arc<dyn HotelService>>,
) -> ApiResult {
    let hotel = hotel_service.detail(&hotel_id).await?;

    View::new("admin_add", "Admin - Update Hotel")
        .with("hotel", &hotel.as_ref().map(HotelView::from))?
        .render(&ctx)
}

#[utoipa::path(
    params(("hotel_id" = String, Path, description = "Hotel id")),
    request_body(content = HotelForm, content_type = "multipart/form-data"),
    responses(
        (status = 302, description = "Updated, redirected to the hotel details. Unknown ids go back to `/admin/edit-remove`"),
        (status = 400, body = AppError, example = json!(AppError::example_400())),
        (status = 422, body = AppError, example = json!(AppError::example_422())),
        (status = 500, body = AppError, example = json!(AppError::example_500()))
    ),
    security(("session" = [])),
    tag = "Admin",
)]
#[post("/{hotel_id}/update")]
pub async fn update_post(
    ctx: RequestContext,
    hotel_id: Path<String>,
    submission: Submission,
    hotel_service: State<Arc<dyn HotelService>>,
    media_service: State<Arc<dyn MediaService>>,
) -> ApiResult {
    let form = HotelForm::from_fields(&submission.fields)?;

    if hotel_service.detail(&hotel_id).await?.is_none() {
        ctx.flash.push(NO_MATCHES)?;
        return Ok(redirect("/admin/edit-remove"));
    }

    let back_to = format!("/admin/{hotel_id}/update");

    let submission = proceed!(
        push_media(
            submission,
            media_service.get_ref().as_ref(),
            &ctx.flash,
            &back_to
        )
        .await?
    );

    let form = form.with_upload(&submission.fields);

    let Some(hotel) = hotel_service.update(&hotel_id, form.into()).await? else {
        ctx.flash.push(NO_MATCHES)?;
        return Ok(redirect("/admin/edit-remove"));
    };

    ctx.flash.push(FlashMessage::success(format!(
        "{} updated successfully!",
        hotel.name
    )))?;

    Ok(redirect(&format!("/all/{}/details", hotel.id)))
}

#[utoipa::path(
    params(("hotel_id" = String, Path, description = "Hotel id")),
    responses(
        (status = 200, body = HotelView, description = "View `admin_add` asking to confirm the deletion"),
        (status = 500, body = AppError, example = json!(AppError::example_500()))
    ),
    security(("session" = [])),
    tag = "Admin",
)]
#[get("/{hotel_id}/delete")]
pub async fn delete_get(
    ctx: RequestContext,
    hotel_id: Path<String>,
    hotel_service: State<Arc<dyn HotelService>>,
) -> ApiResult {
    let hotel = hotel_service.detail(&hotel_id).await?;

    View::new("admin_add", "Admin - Delete Hotel")
        .with("hotel", &hotel.as_ref().map(HotelView::from))?
        .render(&ctx)
}

#[utoipa::path(
    params(("hotel_id" = String, Path, description = "Hotel id")),
    responses(
        (status = 302, description = "Deleted, redirected to `/`"),
        (status = 500, body = AppError, example = json!(AppError::example_500()))
    ),
    security(("session" = [])),
    tag = "Admin",
)]
#[post("/{hotel_id}/delete")]
pub async fn delete_post(
    ctx: RequestContext,
    hotel_id: Path<String>,
    hotel_service: State<Arc<dyn HotelService>>,
) -> ApiResult {
    match hotel_service.delete(&hotel_id).await? {
        Some(hotel) => ctx
            .flash
            .push(FlashMessage::new(format!("{} has been deleted!", hotel.name)))?,
        None => ctx.flash.push(NO_MATCHES)?,
    }

    Ok(redirect("/"))
}
