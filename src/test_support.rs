//! Shared fixtures for unit tests

use std::io::Cursor;
use std::time::Duration;

use chrono::Utc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::models::{RemovalResult, SourceFile};

/// Encode a transparent RGBA PNG of the given size
pub fn tiny_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::new(width, height);
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

pub fn source(name: &str, mime: &str, size: u64) -> SourceFile {
    SourceFile {
        path: name.into(),
        name: name.into(),
        mime: mime.into(),
        size,
    }
}

pub fn cutout() -> RemovalResult {
    RemovalResult {
        bytes: tiny_png(2, 2),
        content_type: "image/png".into(),
        dimensions: Some((2, 2)),
        time_ms: 12,
        received_at: Utc::now(),
    }
}

/// A request as seen by [`serve_once`]
pub struct CapturedRequest {
    pub head: String,
    pub body: Vec<u8>,
}

/// Bind a loopback listener that answers exactly one HTTP/1.1 request with
/// the given status, content type and body. Returns the base URL and a
/// handle resolving to the captured request.
pub async fn serve_once(
    status: u16,
    content_type: &str,
    body: Vec<u8>,
) -> (String, tokio::task::JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let content_type = content_type.to_string();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut chunk = [0u8; 8192];

        // Headers first, then as many body bytes as Content-Length says
        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending headers");
            raw.extend_from_slice(&chunk[..n]);
            if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };
        let head = String::from_utf8_lossy(&raw[..header_end]).into_owned();
        let content_length = head
            .lines()
            .find_map(|l| {
                let (k, v) = l.split_once(':')?;
                k.eq_ignore_ascii_case("content-length")
                    .then(|| v.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        while raw.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&chunk[..n]);
        }

        let reply = format!(
            "HTTP/1.1 {} X\r\ncontent-type: {}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
            status,
            content_type,
            body.len()
        );
        socket.write_all(reply.as_bytes()).await.unwrap();
        socket.write_all(&body).await.unwrap();
        socket.flush().await.unwrap();
        // Give the client a moment to read before the socket drops
        tokio::time::sleep(Duration::from_millis(20)).await;

        CapturedRequest {
            head,
            body: raw[header_end..].to_vec(),
        }
    });

    (format!("http://{}", addr), handle)
}

/// A base URL nothing is listening on
pub async fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
