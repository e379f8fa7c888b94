use crate::error::{Result, WebApiTestError};
use crate::models::{ExecutionResult, PreparedRequest, Response};
use crate::scene::Scene;
use colored::*;
use reqwest::header::SET_COOKIE;
use reqwest::{Client, Method};
use serde_json::json;
use std::collections::HashMap;
use std::time::Instant;

/// Send one prepared request.
///
/// GET carries the payload as query string, every other method as a form body.
pub async fn execute_request(client: &Client, request: &PreparedRequest) -> Result<Response> {
    let method = Method::from_bytes(request.method.as_bytes())
        .map_err(|_| WebApiTestError::Request(format!("Unsupported HTTP method: {}", request.method)))?;

    log::debug!("Making {} request to: {}", method, request.url);

    let mut request_builder = client.request(method, &request.url);
    for (key, value) in &request.headers {
        request_builder = request_builder.header(key, value);
    }

    request_builder = if request.is_get() {
        request_builder.query(&request.payload)
    } else {
        request_builder.form(&request.payload)
    };

    let start_time = Instant::now();
    let response = request_builder.send().await?;
    let latency = start_time.elapsed();
    let status_code = response.status().as_u16();

    let mut headers = HashMap::new();
    for (key, value) in response.headers() {
        if let Ok(value_str) = value.to_str() {
            headers.insert(key.to_string().to_lowercase(), value_str.to_string());
        }
    }

    let set_cookies = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_string)
        .collect();

    let body = response.text().await?;

    log::debug!(
        "Response: {} {} ({}ms)",
        status_code,
        if status_code < 400 { "✓".green() } else { "✗".red() },
        latency.as_millis()
    );

    Ok(Response {
        status_code,
        headers,
        set_cookies,
        body,
        latency,
    })
}

/// Run every case of a scene. A failed case is recorded and the next one still runs.
///
/// The outcome of each case is stored in its `response` field.
pub async fn execute_scene(client: &Client, scene: &mut Scene) -> Vec<ExecutionResult> {
    log::info!("Running scene '{}' ({} case(s))", scene.name, scene.cases.len());

    let mut results = Vec::new();

    for (index, request) in scene.prepare_requests().into_iter().enumerate() {
        match execute_request(client, &request).await {
            Ok(response) => {
                let success = response.status_code < 400;
                if success {
                    log::info!("✓ {} / {}", request.scene_name.green(), request.case_name);
                } else {
                    log::warn!(
                        "✗ {} / {} - status {}",
                        request.scene_name.red(),
                        request.case_name,
                        response.status_code
                    );
                }

                if let Some(case) = scene.cases.get_mut(index) {
                    case.response = Some(json!({
                        "status_code": response.status_code,
                        "body": response.body,
                    }));
                }

                results.push(ExecutionResult {
                    scene_name: request.scene_name,
                    case_name: request.case_name,
                    success,
                    response: Some(response),
                    error: None,
                });
            }
            Err(e) => {
                log::error!("✗ {} / {} - Request failed: {}", request.scene_name.red(), request.case_name, e);
                results.push(ExecutionResult::failed(&request.scene_name, &request.case_name, e.to_string()));
            }
        }
    }

    results
}

/// Print execution results in a formatted way
pub fn print_execution_results(results: &[ExecutionResult]) {
    println!("\n{}", "=== Execution Results ===".bold().blue());

    let mut total_success = 0;
    let mut total_failed = 0;

    for result in results {
        let status_icon = if result.success { "✓".green() } else { "✗".red() };
        println!("{} {} / {}", status_icon, result.scene_name.bold(), result.case_name);

        if let Some(response) = &result.response {
            println!(
                "  Status: {} ({}ms)",
                response.status_code.to_string().cyan(),
                response.latency.as_millis().to_string().yellow()
            );
        }

        if result.success {
            total_success += 1;
        } else {
            total_failed += 1;
            if let Some(error) = &result.error {
                println!("  Error: {}", error.red());
            }
        }
    }

    let summary = if total_failed == 0 {
        format!("All {total_success} cases passed").green()
    } else {
        format!("{total_success} passed, {total_failed} failed").red()
    };

    println!("\n{}: {}", "Summary".bold(), summary);
}

/// Check if all results are successful
pub fn all_successful(results: &[ExecutionResult]) -> bool {
    results.iter().all(|r| r.success)
}
