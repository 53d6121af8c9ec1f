//! Access log: one colored line per request on stdout.

use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

/// `1234567` -> `1.234.567`
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

fn print_line(color: &str, millis: u128, size: &str, status: u16, method: &str, path: &str) {
    println!(
        "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
        color,
        chrono::Local::now().format("%H:%M:%S"),
        millis,
        size,
        status,
        method,
        path
    );
}

pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();
    let status = parts.status.as_u16();

    // body is buffered to report its real size
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!("failed to read response body for {} {}: {}", method, path, e);
            print_line("33", start.elapsed().as_millis(), "error", status, method.as_str(), &path);
            return Response::from_parts(parts, Body::default());
        }
    };

    let color = if parts.status.is_success() { "36" } else { "33" };
    print_line(
        color,
        start.elapsed().as_millis(),
        &group_thousands(bytes.len()),
        status,
        method.as_str(),
        &path,
    );

    Response::from_parts(parts, Body::from(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1.000");
        assert_eq!(group_thousands(1234567), "1.234.567");
    }
}
