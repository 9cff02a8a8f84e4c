use std::io;

use axum::{
    body::Body,
    extract::{
        multipart::MultipartRejection,
        rejection::{PathRejection, QueryRejection},
        DefaultBodyLimit, Multipart, Path, Query, State,
    },
    http::{header, HeaderValue},
    response::Response,
    routing::{delete, get, post, put},
    Json, Router,
};
use futures_util::TryStreamExt;
use tokio_util::io::StreamReader;
use tracing::{trace, warn};

use crate::server::controllers::files::FileController;
use crate::server::error::{ServerError, ServerResult};
use crate::server::models::files::{
    FileList, FileMessage, MoveResult, QueryArgs, RenameResult, SortKey,
};
use crate::server::validation::{require_pair, validate_upload_name};

pub fn routes(controller: FileController, max_filesize: Option<usize>) -> Router {
    Router::new()
        .route("/files", get(list_files))
        .route("/download/*filename", get(download_file))
        .route(
            "/upload",
            post(upload_file).layer(if let Some(s) = max_filesize {
                DefaultBodyLimit::max(s)
            } else {
                DefaultBodyLimit::disable()
            }),
        )
        .route("/delete/:filename", delete(delete_file))
        .route("/move", post(move_file))
        .route("/rename", put(rename_file))
        .with_state(controller)
}

pub async fn list_files(
    State(files): State<FileController>,
    query: Result<Query<QueryArgs>, QueryRejection>,
) -> ServerResult<Json<FileList>> {
    let sort = SortKey::from_query(query_args(query).get("sort").as_deref());
    let files = files.list(sort).await?;

    Ok(Json(FileList { files }))
}

pub async fn download_file(
    State(files): State<FileController>,
    filename: Result<Path<String>, PathRejection>,
) -> ServerResult<Response> {
    let filename = path_filename(filename)?;
    let download = files.open(&filename).await?;

    let mut res = Response::new(Body::from_stream(download.stream));

    res.headers_mut().append(
        header::CONTENT_TYPE,
        HeaderValue::from_static(download.content_type),
    );

    // from_bytes so non-ascii names survive
    res.headers_mut().append(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_bytes(attachment_disposition(&download.file_name).as_bytes())
            .map_err(|_e| ServerError::IOError { why: "File name cannot be sent as a header".to_string() })?,
    );

    Ok(res)
}

/// Writes the multipart field `file` under the root. Fields with any other
/// name are ignored.
pub async fn upload_file(
    State(files): State<FileController>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ServerResult<Json<FileMessage>> {
    let mut multipart = multipart.map_err(|e| {
        warn!("Rejected upload body: {}", e.body_text());
        no_file_part()
    })?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::AxumError { why: format!("Multipart error: {}", e.body_text()) })?
    {
        // A `file` field without a filename is a plain form value, not a file part.
        let Some(file_name) = field.file_name().filter(|_| field.name() == Some("file")) else {
            continue;
        };

        let filename = validate_upload_name(file_name)?;
        trace!("Receiving upload {filename}");

        let reader = StreamReader::new(field.map_err(io::Error::other));
        tokio::pin!(reader);
        files.save_upload(&filename, reader).await?;

        return Ok(Json(FileMessage {
            message: "File uploaded successfully",
            filename,
        }));
    }

    Err(no_file_part())
}

/// An unreadable query string counts as an empty one.
fn query_args(query: Result<Query<QueryArgs>, QueryRejection>) -> QueryArgs {
    match query {
        Ok(Query(args)) => args,
        Err(e) => {
            warn!("Ignoring query string: {}", e.body_text());
            QueryArgs::default()
        }
    }
}

/// A file name that can't be decoded from the path can't name a file.
fn path_filename(filename: Result<Path<String>, PathRejection>) -> ServerResult<String> {
    filename.map(|Path(name)| name).map_err(|e| {
        warn!("Rejected file path: {}", e.body_text());
        ServerError::file_not_found()
    })
}

/// `attachment; filename="..."` with `\` and `"` escaped as a quoted-string.
pub fn attachment_disposition(file_name: &str) -> String {
    let mut value = String::with_capacity(file_name.len() + 24);
    value.push_str("attachment; filename=\"");
    for c in file_name.chars() {
        if c == '"' || c == '\\' {
            value.push('\\');
        }
        value.push(c);
    }
    value.push('"');
    value
}

fn no_file_part() -> ServerError {
    ServerError::ValidationError { why: "No file part".to_string() }
}

pub async fn delete_file(
    State(files): State<FileController>,
    filename: Result<Path<String>, PathRejection>,
) -> ServerResult<Json<FileMessage>> {
    let filename = path_filename(filename)?;
    files.delete(&filename).await?;

    Ok(Json(FileMessage {
        message: "File deleted successfully",
        filename,
    }))
}

pub async fn move_file(
    State(files): State<FileController>,
    query: Result<Query<QueryArgs>, QueryRejection>,
) -> ServerResult<Json<MoveResult>> {
    let args = query_args(query);
    let (file, to) = require_pair(args.get("file"), args.get("to"), "Missing file name or target folder")?;

    let (from, to) = files.mv(&file, &to).await?;

    Ok(Json(MoveResult {
        message: "File moved successfully",
        file,
        from: from.to_string_lossy().into_owned(),
        to: to.to_string_lossy().into_owned(),
    }))
}

pub async fn rename_file(
    State(files): State<FileController>,
    query: Result<Query<QueryArgs>, QueryRejection>,
) -> ServerResult<Json<RenameResult>> {
    let args = query_args(query);
    let (old_name, new_name) = require_pair(args.get("old_name"), args.get("new_name"), "Missing old_name or new_name")?;

    files.rename(&old_name, &new_name).await?;

    Ok(Json(RenameResult {
        message: "File renamed successfully",
        old_name,
        new_name,
    }))
}
