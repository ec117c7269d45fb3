//! API Response Handler
//!
//! Applies results from the background fetch tasks to the model. Stale
//! listing responses are dropped by revision; auth failures anywhere drop
//! the session back to the connect screen.

use crate::api::ApiError;
use crate::app::App;
use crate::log_debug;
use crate::logic::errors::{classify_network_failure, guidance};
use crate::logic::url::parse_base_url;
use crate::services::{ApiResponse, BatchKind};

pub fn handle_api_response(app: &mut App, response: ApiResponse) {
    match response {
        ApiResponse::LoginResult {
            url,
            username,
            server_name,
            result,
        } => match result {
            Ok((client, token)) => {
                app.complete_login(url, username, server_name, client, token);
            }
            Err(e) => {
                app.model.session.login_in_flight = false;
                app.model.session.error = Some(login_error_message(&url, &e));
            }
        },

        ApiResponse::ListingResult {
            revision,
            path,
            entries,
        } => match entries {
            Ok(entries) => {
                if app.model.listing.apply_entries(revision, entries) {
                    let visible_len = app.visible_entries().len();
                    app.model.listing.clamp_cursor(visible_len);
                } else {
                    log_debug(&format!("listing: dropped stale result for {}", path));
                }
            }
            Err(e) => {
                if e.is_auth() {
                    app.force_logout(format!("Session expired: {}", e));
                    return;
                }
                let message = listing_error_message(app, &e);
                app.model.listing.apply_error(revision, message);
            }
        },

        ApiResponse::PreviewResult { path, result } => {
            app.apply_preview(path, result);
        }

        ApiResponse::UploadResult { file_name, result } => match result {
            Ok(dest) => {
                app.model.show_toast(format!("Uploaded {}", file_name));
                log_debug(&format!("upload: {} -> {}", file_name, dest));
                // The new file should appear without a manual refresh
                app.refresh(true);
            }
            Err(e) => {
                if e.is_auth() {
                    app.force_logout(format!("Session expired: {}", e));
                    return;
                }
                app.model
                    .show_toast(format!("Error: upload of {} failed: {}", file_name, e));
            }
        },

        ApiResponse::DeleteResult { dir, names, result } => match result {
            Ok(()) => {
                app.model.show_toast(format!("Deleted {} item(s)", names.len()));
                app.model.listing.exit_selection();
                if app.model.listing.path == dir {
                    app.refresh(true);
                }
            }
            Err(e) => {
                if e.is_auth() {
                    app.force_logout(format!("Session expired: {}", e));
                    return;
                }
                app.model.show_toast(format!("Error: delete failed: {}", e));
            }
        },

        ApiResponse::LinkResult { name, result } => match result {
            Ok(link) => app.collected_links.push(link),
            Err(e) => {
                log_debug(&format!("link for {} failed: {}", name, e));
            }
        },

        ApiResponse::DownloadResult { name, result } => match result {
            Ok(target) => {
                log_debug(&format!("download: {} -> {}", name, target.display()));
            }
            Err(e) => {
                log_debug(&format!("download of {} failed: {}", name, e));
            }
        },

        ApiResponse::BatchFinished { kind, ok, failed } => {
            match kind {
                BatchKind::CopyLinks => {
                    if app.collected_links.is_empty() {
                        app.model
                            .show_toast(format!("Error: no links resolved ({} failed)", failed));
                    } else {
                        let text = app.collected_links.join("\n");
                        app.copy_to_clipboard(&text);
                        if failed > 0 {
                            app.model.show_toast(format!(
                                "Copied {} link(s), {} failed",
                                ok, failed
                            ));
                        }
                    }
                    app.collected_links.clear();
                }
                BatchKind::Download => {
                    if failed == 0 {
                        app.model.show_toast(format!(
                            "Downloaded {} file(s) to {}",
                            ok,
                            app.config.download_dir().display()
                        ));
                    } else {
                        app.model
                            .show_toast(format!("Downloaded {}, {} failed", ok, failed));
                    }
                }
            }
            app.model.listing.exit_selection();
        }
    }
}

/// Login failures get a guidance line because the URL is the usual culprit
fn login_error_message(url: &str, e: &ApiError) -> String {
    match e {
        ApiError::Network(_) | ApiError::Timeout => {
            let raw = e.to_string();
            match parse_base_url(url) {
                Ok(base) => {
                    let hint = classify_network_failure(&raw, &base);
                    format!("{}\n{}", raw, guidance(hint))
                }
                Err(_) => raw,
            }
        }
        _ => e.to_string(),
    }
}

fn listing_error_message(app: &App, e: &ApiError) -> String {
    match e {
        ApiError::Network(_) | ApiError::Timeout => {
            let raw = e.to_string();
            match &app.client {
                Some(client) => {
                    let hint = classify_network_failure(&raw, client.base_url());
                    format!("{}\n{}", raw, guidance(hint))
                }
                None => raw,
            }
        }
        _ => e.to_string(),
    }
}
