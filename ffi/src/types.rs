//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! tagged enums with explicit discriminants. Conversion functions live here
//! to keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use posts_core::error::ApiError;
use posts_core::http::HttpMethod;

/// Opaque handle to a `PostClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiPostClient {
    pub(crate) inner: posts_core::PostClient,
}

/// Move a Rust string onto the C heap. Interior NULs cannot be represented
/// in a C string and are dropped.
pub(crate) fn c_string(s: String) -> *mut c_char {
    let owned = match CString::new(s) {
        Ok(c) => c,
        Err(e) => {
            let mut bytes = e.into_vec();
            bytes.retain(|b| *b != 0);
            CString::new(bytes).unwrap_or_default()
        }
    };
    owned.into_raw()
}

fn c_string_opt(s: Option<String>) -> *mut c_char {
    s.map(c_string).unwrap_or(std::ptr::null_mut())
}

/// Hand a `Vec` to C as a raw pointer; empty vectors become null.
/// Reclaim with `reclaim_slice` using the same length.
fn leak_vec<T>(items: Vec<T>) -> *mut T {
    if items.is_empty() {
        return std::ptr::null_mut();
    }
    Box::into_raw(items.into_boxed_slice()) as *mut T
}

/// Take back ownership of an array produced by `leak_vec`.
///
/// # Safety
/// `ptr` must come from `leak_vec` with exactly `len` elements, and must
/// not be reclaimed twice.
pub(crate) unsafe fn reclaim_slice<T>(ptr: *mut T, len: usize) -> Box<[T]> {
    unsafe { Box::from_raw(std::ptr::slice_from_raw_parts_mut(ptr, len)) }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Delete = 2,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `posts_build_*` functions. The C caller executes the request
/// and passes the response back through `posts_parse_*`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: posts_core::HttpRequest) -> *mut Self {
        let headers_len = req.headers.len() as u32;
        let headers = leak_vec(
            req.headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: c_string(k),
                    value: c_string(v),
                })
                .collect(),
        );

        let ffi_req = Box::new(FfiHttpRequest {
            method: req.method.into(),
            path: c_string(req.path),
            headers,
            headers_len,
            body: c_string_opt(req.body),
        });
        Box::into_raw(ffi_req)
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing an HTTP request,
/// then passes a pointer to a `posts_parse_*` function. The FFI layer reads
/// but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiPostResult`.
#[repr(C)]
pub enum FfiErrorCode {
    Ok = 0,
    Http = 1,
    Deserialization = 2,
    Serialization = 3,
    Transport = 4,
    Panic = 5,
    NullArg = 6,
}

/// Tag that tells `posts_free_result` what `FfiPostResult::data` points to.
#[repr(C)]
pub enum FfiDataTag {
    None = 0,
    Reply = 1,
    PostList = 2,
}

/// A single post exposed to C.
///
/// `id` is null when the server sent no usable `_id` or `id`, and `text`
/// is null unless the server sent it as a string. `json` is
/// the whole record, every server field included, with `createdAt`
/// normalized to an ISO 8601 UTC string.
#[repr(C)]
pub struct FfiPost {
    pub id: *mut c_char,
    pub text: *mut c_char,
    pub created_at_ms: i64,
    pub json: *mut c_char,
}

/// A list of posts exposed to C, in server order.
#[repr(C)]
pub struct FfiPostList {
    pub items: *mut FfiPost,
    pub len: u32,
}

/// The server's answer to a create or delete, passed through unchanged.
#[repr(C)]
pub struct FfiReply {
    pub status: u16,
    pub body: *mut c_char,
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the parsed payload (tagged by `data_tag`).
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `data` is null.
#[repr(C)]
pub struct FfiPostResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut std::ffi::c_void,
}

impl FfiPostResult {
    fn boxed(
        error_code: FfiErrorCode,
        error_message: *mut c_char,
        http_status: u16,
        data_tag: FfiDataTag,
        data: *mut std::ffi::c_void,
    ) -> *mut Self {
        Box::into_raw(Box::new(FfiPostResult {
            error_code,
            error_message,
            http_status,
            data_tag,
            data,
        }))
    }

    /// Build a success result carrying a `FfiPostList`.
    pub(crate) fn ok_post_list(posts: Vec<posts_core::Post>) -> *mut Self {
        let mut items = Vec::with_capacity(posts.len());
        for post in posts {
            let json = match serde_json::to_string(&post) {
                Ok(json) => json,
                Err(e) => {
                    free_post_items(items);
                    return Self::from_error(ApiError::SerializationError(e.to_string()));
                }
            };
            items.push(FfiPost {
                id: c_string_opt(post.id()),
                text: c_string_opt(post.text().map(str::to_string)),
                created_at_ms: post.created_at.timestamp_millis(),
                json: c_string(json),
            });
        }

        let len = items.len() as u32;
        let list = Box::new(FfiPostList {
            items: leak_vec(items),
            len,
        });
        Self::boxed(
            FfiErrorCode::Ok,
            std::ptr::null_mut(),
            0,
            FfiDataTag::PostList,
            Box::into_raw(list) as *mut std::ffi::c_void,
        )
    }

    /// Build a success result carrying the server's reply.
    pub(crate) fn ok_reply(response: posts_core::HttpResponse) -> *mut Self {
        let reply = Box::new(FfiReply {
            status: response.status,
            body: c_string(response.body),
        });
        Self::boxed(
            FfiErrorCode::Ok,
            std::ptr::null_mut(),
            response.status,
            FfiDataTag::Reply,
            Box::into_raw(reply) as *mut std::ffi::c_void,
        )
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let (error_code, http_status) = match &err {
            ApiError::HttpError { status, .. } => (FfiErrorCode::Http, *status),
            ApiError::DeserializationError(_) => (FfiErrorCode::Deserialization, 0),
            ApiError::SerializationError(_) => (FfiErrorCode::Serialization, 0),
            ApiError::Transport(_) => (FfiErrorCode::Transport, 0),
        };
        Self::boxed(
            error_code,
            c_string(err.to_string()),
            http_status,
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::boxed(
            FfiErrorCode::NullArg,
            c_string(format!("null argument: {name}")),
            0,
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::boxed(
            FfiErrorCode::Panic,
            c_string(msg.to_string()),
            0,
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }
}

/// Release the C strings owned by a batch of posts that never reached C.
fn free_post_items(items: Vec<FfiPost>) {
    for item in &items {
        free_ffi_post_fields(item);
    }
}

/// Free the C-string fields of an `FfiPost` (but not the struct itself).
pub(crate) fn free_ffi_post_fields(post: &FfiPost) {
    for ptr in [post.id, post.text, post.json] {
        if !ptr.is_null() {
            drop(unsafe { CString::from_raw(ptr) });
        }
    }
}
