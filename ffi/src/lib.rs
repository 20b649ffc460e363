//! C-ABI wrapper around `posts-core`.
//!
//! # Overview
//! Exposes the posts list/create/delete API through `extern "C"` functions
//! so a UI written in any language with a C FFI can build and parse HTTP
//! requests/responses without linking to Rust's async runtime or serde.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Per-operation `build_*` / `parse_*` mirrors the core API 1:1.
//! - A single `FfiPostResult` envelope with `FfiDataTag` + `void* data`
//!   conveys success payloads and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `posts_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, UnwindSafe};

use posts_core::http::HttpResponse;
use posts_core::types::NewPost;

use types::*;

/// Borrow a C string as UTF-8. `None` for null or invalid UTF-8.
fn str_arg<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `PostClient` bound to `base_url`.
///
/// Returns null if `base_url` is null, not UTF-8, or if an internal panic
/// occurs. An empty string keeps request paths relative (`api/posts/`).
/// The caller must free the returned pointer with `posts_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn posts_client_new(base_url: *const c_char) -> *mut FfiPostClient {
    catch_unwind(|| match str_arg(base_url) {
        Some(url) => Box::into_raw(Box::new(FfiPostClient {
            inner: posts_core::PostClient::new(url),
        })),
        None => std::ptr::null_mut(),
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a `PostClient` created by `posts_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn posts_client_free(client: *mut FfiPostClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build an HTTP request for listing all posts.
///
/// Returns null if `client` is null.
/// The caller must free the returned pointer with `posts_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn posts_build_list_posts(client: *const FfiPostClient) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_list_posts())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build an HTTP request for creating a post with the given text.
///
/// Returns null if `client` or `text` is null, `text` is not UTF-8, or
/// serialization fails.
#[unsafe(no_mangle)]
pub extern "C" fn posts_build_create_post(
    client: *const FfiPostClient,
    text: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let Some(text) = str_arg(text) else {
            return std::ptr::null_mut();
        };
        match client.inner.build_create_post(&NewPost::new(text)) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build an HTTP request for deleting a post.
///
/// `id` is appended to the collection path verbatim. Returns null if
/// `client` or `id` is null, or `id` is not UTF-8.
#[unsafe(no_mangle)]
pub extern "C" fn posts_build_delete_post(
    client: *const FfiPostClient,
    id: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let Some(id) = str_arg(id) else {
            return std::ptr::null_mut();
        };
        FfiHttpRequest::from_core(client.inner.build_delete_post(id))
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Convert an `FfiHttpResponse` to a core `HttpResponse`.
///
/// A null body is read as the empty string; invalid UTF-8 is replaced.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        unsafe { CStr::from_ptr(resp.body) }.to_string_lossy().into_owned()
    };
    HttpResponse {
        status: resp.status,
        headers: Vec::new(),
        body,
    }
}

/// Shared null checks and panic guard for every `posts_parse_*` function.
fn parse_with<F>(
    name: &str,
    client: *const FfiPostClient,
    response: *const FfiHttpResponse,
    parse: F,
) -> *mut FfiPostResult
where
    F: FnOnce(&posts_core::PostClient, HttpResponse) -> *mut FfiPostResult + UnwindSafe,
{
    catch_unwind(|| {
        if client.is_null() {
            return FfiPostResult::null_arg("client");
        }
        if response.is_null() {
            return FfiPostResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        parse(&client.inner, ffi_response_to_core(resp))
    })
    .unwrap_or_else(|_| FfiPostResult::panic(&format!("panic in {name}")))
}

/// Parse an HTTP response from a list-posts request.
///
/// Returns a result with `data_tag = PostList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn posts_parse_list_posts(
    client: *const FfiPostClient,
    response: *const FfiHttpResponse,
) -> *mut FfiPostResult {
    parse_with("posts_parse_list_posts", client, response, |c, resp| {
        match c.parse_list_posts(resp) {
            Ok(posts) => FfiPostResult::ok_post_list(posts),
            Err(e) => FfiPostResult::from_error(e),
        }
    })
}

/// Parse an HTTP response from a create-post request.
///
/// Returns a result with `data_tag = Reply` on any 2xx status.
#[unsafe(no_mangle)]
pub extern "C" fn posts_parse_create_post(
    client: *const FfiPostClient,
    response: *const FfiHttpResponse,
) -> *mut FfiPostResult {
    parse_with("posts_parse_create_post", client, response, |c, resp| {
        match c.parse_create_post(resp) {
            Ok(reply) => FfiPostResult::ok_reply(reply),
            Err(e) => FfiPostResult::from_error(e),
        }
    })
}

/// Parse an HTTP response from a delete-post request.
///
/// Returns a result with `data_tag = Reply` on any 2xx status.
#[unsafe(no_mangle)]
pub extern "C" fn posts_parse_delete_post(
    client: *const FfiPostClient,
    response: *const FfiHttpResponse,
) -> *mut FfiPostResult {
    parse_with("posts_parse_delete_post", client, response, |c, resp| {
        match c.parse_delete_post(resp) {
            Ok(reply) => FfiPostResult::ok_reply(reply),
            Err(e) => FfiPostResult::from_error(e),
        }
    })
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `posts_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn posts_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        if !req.path.is_null() {
            drop(unsafe { CString::from_raw(req.path) });
        }
        if !req.body.is_null() {
            drop(unsafe { CString::from_raw(req.body) });
        }
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe { reclaim_slice(req.headers, req.headers_len as usize) };
            for h in headers.iter() {
                if !h.key.is_null() {
                    drop(unsafe { CString::from_raw(h.key) });
                }
                if !h.value.is_null() {
                    drop(unsafe { CString::from_raw(h.value) });
                }
            }
        }
    });
}

/// Free an `FfiPostResult` returned by any `posts_parse_*` function.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn posts_free_result(result: *mut FfiPostResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::Reply => {
                let reply = unsafe { Box::from_raw(result.data as *mut FfiReply) };
                if !reply.body.is_null() {
                    drop(unsafe { CString::from_raw(reply.body) });
                }
            }
            FfiDataTag::PostList => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiPostList) };
                if !list.items.is_null() && list.len > 0 {
                    let items = unsafe { reclaim_slice(list.items, list.len as usize) };
                    for item in items.iter() {
                        free_ffi_post_fields(item);
                    }
                }
            }
            FfiDataTag::None => {}
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn posts_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
