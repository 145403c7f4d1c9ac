use std::collections::HashMap;

use actix_multipart::{Field, Multipart};
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, dev::UrlEncoded};
use futures::future::{FutureExt, LocalBoxFuture};
use futures::StreamExt;

use crate::api::middlewares::flash::{Flash, FlashMessage};
use crate::api::middlewares::flow::Flow;
use crate::api::views::redirect;
use crate::domain::error::{AppError, AppResult};
use crate::domain::models::media::UploadedImage;
use crate::domain::services::media::MediaService;

const IMAGE_FIELD: &str = "image";

const IMAGE_LIMIT: usize = 10 * 1024 * 1024;
const FIELD_LIMIT: usize = 32768;

/// Listing form as submitted: text fields plus the optional image file.
#[derive(Debug, Default)]
pub struct Submission {
    pub fields: HashMap<String, String>,
    pub image: Option<UploadedImage>,
}

fn is_multipart(req: &HttpRequest) -> bool {
    matches!(
        req.mime_type(),
        Ok(Some(mime)) if mime.type_() == mime::MULTIPART && mime.subtype() == mime::FORM_DATA
    )
}

async fn read_field(field: &mut Field, limit: usize) -> AppResult<Vec<u8>> {
    let mut bytes = Vec::new();

    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|err| AppError::BadRequest(err.to_string()))?;

        if bytes.len() + chunk.len() > limit {
            return Err(AppError::BadRequest(format!(
                "Field exceeds the {limit} byte limit"
            )));
        }

        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

async fn read_multipart(mut multipart: Multipart) -> AppResult<Submission> {
    let mut submission = Submission::default();

    while let Some(field) = multipart.next().await {
        let mut field = field.map_err(|err| AppError::BadRequest(err.to_string()))?;

        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        let file_name = field
            .content_disposition()
            .and_then(|disposition| disposition.get_filename())
            .map(str::to_string);

        match file_name {
            Some(file_name) => {
                let content_type = field.content_type().map(|mime| mime.to_string());
                let bytes = read_field(&mut field, IMAGE_LIMIT).await?;

                // browsers send an empty part when no file was picked
                if name == IMAGE_FIELD && !bytes.is_empty() {
                    submission.image = Some(UploadedImage {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
            }
            None => {
                let bytes = read_field(&mut field, FIELD_LIMIT).await?;

                if name == IMAGE_FIELD {
                    continue;
                }

                let value = String::from_utf8(bytes)
                    .map_err(|_| AppError::BadRequest(format!("Field {name} is not valid UTF-8")))?;

                submission.fields.insert(name, value);
            }
        }
    }

    Ok(submission)
}

impl FromRequest for Submission {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        if is_multipart(req) {
            let multipart = Multipart::new(req.headers(), payload.take());
            return read_multipart(multipart).boxed_local();
        }

        UrlEncoded::<HashMap<String, String>>::new(req, payload)
            .limit(FIELD_LIMIT)
            .map(|res| match res {
                Ok(fields) => Ok(Submission {
                    fields: fields
                        .into_iter()
                        .filter(|(name, _)| name != IMAGE_FIELD)
                        .collect(),
                    image: None,
                }),
                Err(err) => Err(AppError::from(err)),
            })
            .boxed_local()
    }
}

/// Swaps the uploaded file for the media host's reference id. A failed
/// upload sends the admin back to `back_to` with a flash message.
pub async fn push_media(
    mut submission: Submission,
    media_service: &dyn MediaService,
    flash: &Flash,
    back_to: &str,
) -> AppResult<Flow<Submission>> {
    let Some(image) = submission.image.take() else {
        return Ok(Flow::Continue(submission));
    };

    match media_service.upload(image).await {
        Ok(reference) => {
            submission.fields.insert(IMAGE_FIELD.to_string(), reference);
            Ok(Flow::Continue(submission))
        }
        Err(error) => {
            tracing::warn!(%error, "image upload failed");
            flash.push(FlashMessage::danger("Problem uploading image."))?;
            Ok(Flow::Halt(redirect(back_to)))
        }
    }
}
