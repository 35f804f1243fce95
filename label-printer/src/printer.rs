//! Printer adapters for sending ZPL data
//!
//! Supports:
//! - Network printers (raw TCP port 9100)
//! - HTTP POST to the printer port
//! - Windows spooler printers (RAW jobs via Win32 API)

use crate::error::{PrintError, PrintResult};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{info, instrument, warn};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
const PROBE_TIMEOUT: Duration = Duration::from_millis(500);

/// Trait for printer adapters
#[allow(async_fn_in_trait)]
pub trait Printer {
    /// Send raw ZPL data to the printer
    async fn print(&self, data: &[u8]) -> PrintResult<()>;

    /// Check if the printer is online/reachable
    async fn is_online(&self) -> bool;
}

fn validate_host(host: &str, port: u16) -> PrintResult<()> {
    if host.trim().is_empty() {
        return Err(PrintError::InvalidConfig("Printer host is empty".to_string()));
    }
    if port == 0 {
        return Err(PrintError::InvalidConfig(format!(
            "Invalid port for {}: 0",
            host
        )));
    }
    Ok(())
}

/// Single TCP connect with a short timeout
async fn probe(host: &str, port: u16) -> bool {
    match tokio::time::timeout(PROBE_TIMEOUT, TcpStream::connect((host, port))).await {
        Ok(Ok(_)) => {
            info!("Printer online");
            true
        }
        Ok(Err(e)) => {
            warn!(error = %e, "Printer offline");
            false
        }
        Err(_) => {
            warn!("Printer check timeout");
            false
        }
    }
}

/// Network printer (raw TCP port 9100)
///
/// Zebra printers accept ZPL streamed directly to port 9100 with no
/// response protocol.
#[derive(Debug, Clone)]
pub struct NetworkPrinter {
    host: String,
    port: u16,
    timeout: Duration,
}

impl NetworkPrinter {
    /// Create a new network printer
    pub fn new(host: &str, port: u16) -> PrintResult<Self> {
        validate_host(host, port)?;
        Ok(Self {
            host: host.trim().to_string(),
            port,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Set connection timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Printer address as `host:port`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Printer for NetworkPrinter {
    #[instrument(skip(self, data), fields(addr = %self.addr(), data_len = data.len()))]
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        info!("Connecting to printer");

        let mut stream = tokio::time::timeout(
            self.timeout,
            TcpStream::connect((self.host.as_str(), self.port)),
        )
        .await
        .map_err(|_| PrintError::Timeout(format!("Connection timeout: {}", self.addr())))?
        .map_err(|e| PrintError::Connection(format!("{}: {}", self.addr(), e)))?;

        info!("Connected, sending {} bytes", data.len());

        tokio::time::timeout(self.timeout, async {
            stream.write_all(data).await?;
            stream.flush().await?;
            stream.shutdown().await
        })
        .await
        .map_err(|_| PrintError::Timeout(format!("Write timeout: {}", self.addr())))?
        .map_err(|e| {
            PrintError::Io(std::io::Error::new(
                e.kind(),
                format!("Write failed: {}", e),
            ))
        })?;

        info!("Print job sent successfully");
        Ok(())
    }

    #[instrument(skip(self), fields(addr = %self.addr()))]
    async fn is_online(&self) -> bool {
        probe(&self.host, self.port).await
    }
}

/// HTTP printer
///
/// POSTs the ZPL document as the request body to `http://host:port`. Only a
/// 200 answer counts as printed.
#[derive(Debug, Clone)]
pub struct HttpPrinter {
    host: String,
    port: u16,
    url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpPrinter {
    pub fn new(host: &str, port: u16) -> PrintResult<Self> {
        validate_host(host, port)?;
        let host = host.trim().to_string();
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| PrintError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(Self {
            url: format!("http://{}:{}", host, port),
            host,
            port,
            timeout: DEFAULT_TIMEOUT,
            client,
        })
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Printer for HttpPrinter {
    #[instrument(skip(self, data), fields(url = %self.url, data_len = data.len()))]
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        info!("Posting print job");

        let response = self
            .client
            .post(&self.url)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(data.to_vec())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PrintError::Timeout(format!("{}: {}", self.url, e))
                } else if e.is_connect() {
                    PrintError::Connection(format!("{}: {}", self.url, e))
                } else {
                    PrintError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            warn!(status = status.as_u16(), "Printer rejected job");
            return Err(PrintError::Status(status.as_u16()));
        }

        info!("Print job sent successfully");
        Ok(())
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn is_online(&self) -> bool {
        probe(&self.host, self.port).await
    }
}

/// Windows spooler printer
///
/// Sends RAW jobs through the installed printer driver (USB attached
/// label printers).
#[cfg(windows)]
#[derive(Debug, Clone)]
pub struct WindowsPrinter {
    name: String,
}

#[cfg(windows)]
mod spool {
    //! Handle guards. Each guard releases exactly what it acquired, and
    //! locals drop in reverse order: page, then document, then printer.

    use windows::Win32::Graphics::Printing::{
        ClosePrinter, EndDocPrinter, EndPagePrinter, PRINTER_HANDLE,
    };

    pub(super) struct PrinterGuard(pub(super) PRINTER_HANDLE);

    impl Drop for PrinterGuard {
        fn drop(&mut self) {
            unsafe {
                let _ = ClosePrinter(self.0);
            }
        }
    }

    pub(super) struct DocGuard(pub(super) PRINTER_HANDLE);

    impl Drop for DocGuard {
        fn drop(&mut self) {
            unsafe {
                let _ = EndDocPrinter(self.0);
            }
        }
    }

    pub(super) struct PageGuard(pub(super) PRINTER_HANDLE);

    impl Drop for PageGuard {
        fn drop(&mut self) {
            unsafe {
                let _ = EndPagePrinter(self.0);
            }
        }
    }

    pub(super) fn to_wide(s: &str) -> Vec<u16> {
        s.encode_utf16().chain(std::iter::once(0)).collect()
    }
}

#[cfg(windows)]
impl WindowsPrinter {
    /// Job name shown in the spooler queue
    const DOC_NAME: &'static str = "ZPL Label";

    pub fn new(name: &str) -> PrintResult<Self> {
        if name.trim().is_empty() {
            return Err(PrintError::InvalidConfig("Printer name is empty".to_string()));
        }
        Ok(Self {
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn open(&self) -> PrintResult<spool::PrinterGuard> {
        use windows::Win32::Graphics::Printing::{OpenPrinterW, PRINTER_HANDLE};
        use windows::core::PCWSTR;

        let name_w = spool::to_wide(&self.name);
        let mut handle = PRINTER_HANDLE::default();
        unsafe {
            OpenPrinterW(PCWSTR::from_raw(name_w.as_ptr()), &mut handle, None).map_err(|_| {
                PrintError::WindowsPrinter(format!("OpenPrinterW failed: {}", self.name))
            })?;
        }
        Ok(spool::PrinterGuard(handle))
    }

    /// Check the spooler status flags for an offline printer
    pub fn check_online(&self) -> PrintResult<bool> {
        use windows::Win32::Graphics::Printing::{
            GetPrinterW, PRINTER_INFO_6, PRINTER_STATUS_OFFLINE,
        };

        let printer = self.open()?;

        unsafe {
            let mut needed: u32 = 0;
            let _ = GetPrinterW(printer.0, 6, None, &mut needed);
            if needed == 0 {
                return Ok(true);
            }

            let mut buf: Vec<u8> = vec![0; needed as usize];
            if GetPrinterW(printer.0, 6, Some(buf.as_mut_slice()), &mut needed).is_ok() {
                let info = *(buf.as_ptr() as *const PRINTER_INFO_6);
                return Ok((info.dwStatus & PRINTER_STATUS_OFFLINE) == 0);
            }
        }

        Ok(true)
    }

    /// Send raw ZPL data synchronously
    pub fn print_sync(&self, data: &[u8]) -> PrintResult<()> {
        use core::ffi::c_void;
        use windows::Win32::Graphics::Printing::{
            DOC_INFO_1W, StartDocPrinterW, StartPagePrinter, WritePrinter,
        };
        use windows::core::PWSTR;

        let printer = self.open()?;

        let doc_name_w = spool::to_wide(Self::DOC_NAME);
        let datatype_w = spool::to_wide("RAW");
        let doc_info = DOC_INFO_1W {
            pDocName: PWSTR(doc_name_w.as_ptr() as *mut _),
            pOutputFile: PWSTR::null(),
            pDatatype: PWSTR(datatype_w.as_ptr() as *mut _),
        };

        unsafe {
            if StartDocPrinterW(printer.0, 1, &doc_info as *const DOC_INFO_1W) == 0 {
                return Err(PrintError::WindowsPrinter(
                    "StartDocPrinter failed".to_string(),
                ));
            }
            let _doc = spool::DocGuard(printer.0);

            if !StartPagePrinter(printer.0).as_bool() {
                return Err(PrintError::WindowsPrinter(
                    "StartPagePrinter failed".to_string(),
                ));
            }
            let _page = spool::PageGuard(printer.0);

            let mut written: u32 = 0;
            let ok = WritePrinter(
                printer.0,
                data.as_ptr() as *const c_void,
                data.len() as u32,
                &mut written,
            );

            if !ok.as_bool() {
                return Err(PrintError::WindowsPrinter(
                    "WritePrinter failed".to_string(),
                ));
            }

            if written != data.len() as u32 {
                return Err(PrintError::WindowsPrinter("Incomplete write".to_string()));
            }
        }

        Ok(())
    }
}

#[cfg(windows)]
impl Printer for WindowsPrinter {
    #[instrument(skip(self, data), fields(printer = %self.name, data_len = data.len()))]
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        // Spooler calls block, run them off the runtime
        let printer = self.clone();
        let data = data.to_vec();

        tokio::task::spawn_blocking(move || printer.print_sync(&data))
            .await
            .map_err(|e| PrintError::WindowsPrinter(format!("Task join failed: {}", e)))??;

        info!("Print job spooled successfully");
        Ok(())
    }

    async fn is_online(&self) -> bool {
        self.check_online().unwrap_or(false)
    }
}

/// Printer selected at startup
#[derive(Debug, Clone)]
pub enum AnyPrinter {
    Network(NetworkPrinter),
    Http(HttpPrinter),
    #[cfg(windows)]
    Spooler(WindowsPrinter),
}

impl AnyPrinter {
    /// Human readable target, e.g. `tcp://10.0.0.5:9100`
    pub fn describe(&self) -> String {
        match self {
            AnyPrinter::Network(p) => format!("tcp://{}", p.addr()),
            AnyPrinter::Http(p) => p.url().to_string(),
            #[cfg(windows)]
            AnyPrinter::Spooler(p) => format!("spooler://{}", p.name()),
        }
    }
}

impl Printer for AnyPrinter {
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        match self {
            AnyPrinter::Network(p) => p.print(data).await,
            AnyPrinter::Http(p) => p.print(data).await,
            #[cfg(windows)]
            AnyPrinter::Spooler(p) => p.print(data).await,
        }
    }

    async fn is_online(&self) -> bool {
        match self {
            AnyPrinter::Network(p) => p.is_online().await,
            AnyPrinter::Http(p) => p.is_online().await,
            #[cfg(windows)]
            AnyPrinter::Spooler(p) => p.is_online().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    #[test]
    fn test_network_printer_new() {
        let printer = NetworkPrinter::new("192.168.1.100", 9100).unwrap();
        assert_eq!(printer.port(), 9100);
        assert_eq!(printer.addr(), "192.168.1.100:9100");
    }

    #[test]
    fn test_invalid_config() {
        assert!(NetworkPrinter::new("", 9100).is_err());
        assert!(NetworkPrinter::new("10.0.0.5", 0).is_err());
        assert!(HttpPrinter::new("  ", 9100).is_err());
    }

    #[test]
    fn test_describe() {
        let tcp = AnyPrinter::Network(NetworkPrinter::new("10.0.0.5", 9100).unwrap());
        assert_eq!(tcp.describe(), "tcp://10.0.0.5:9100");
        let http = AnyPrinter::Http(HttpPrinter::new("10.0.0.5", 9100).unwrap());
        assert_eq!(http.describe(), "http://10.0.0.5:9100");
    }

    #[tokio::test]
    async fn test_network_print_delivers_bytes() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            socket.read_to_end(&mut received).await.unwrap();
            received
        });

        let printer = NetworkPrinter::new("127.0.0.1", port).unwrap();
        printer.print(b"^XA^FDP1^FS^XZ\n").await.unwrap();

        let received = server.await.unwrap();
        assert_eq!(received, b"^XA^FDP1^FS^XZ\n");
    }

    #[tokio::test]
    async fn test_network_print_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let printer = NetworkPrinter::new("127.0.0.1", port)
            .unwrap()
            .with_timeout(Duration::from_secs(1));
        let err = printer.print(b"^XA^XZ").await.unwrap_err();
        assert!(matches!(
            err,
            PrintError::Connection(_) | PrintError::Timeout(_)
        ));
        assert!(!printer.is_online().await);
    }

    #[tokio::test]
    async fn test_network_is_online() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let printer = NetworkPrinter::new("127.0.0.1", port).unwrap();
        assert!(printer.is_online().await);
    }

    /// Minimal HTTP endpoint: reads until the ZPL terminator arrives, then
    /// answers with `status`
    async fn http_stub(status_line: &'static str) -> (u16, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                if String::from_utf8_lossy(&buf).contains("^XZ") {
                    break;
                }
            }
            let response = format!("{}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n", status_line);
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.flush().await.unwrap();
            String::from_utf8_lossy(&buf).to_string()
        });

        (port, handle)
    }

    #[tokio::test]
    async fn test_http_print_ok() {
        let (port, server) = http_stub("HTTP/1.1 200 OK").await;

        let printer = HttpPrinter::new("127.0.0.1", port).unwrap();
        printer.print(b"^XA^FDP1^FS^XZ").await.unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("POST / HTTP/1.1"));
        assert!(
            request
                .to_lowercase()
                .contains("content-type: application/x-www-form-urlencoded")
        );
        assert!(request.ends_with("^XA^FDP1^FS^XZ"));
    }

    #[tokio::test]
    async fn test_http_print_non_200() {
        let (port, server) = http_stub("HTTP/1.1 500 Internal Server Error").await;

        let printer = HttpPrinter::new("127.0.0.1", port).unwrap();
        let err = printer.print(b"^XA^XZ").await.unwrap_err();
        assert!(matches!(err, PrintError::Status(500)));
        server.await.unwrap();
    }
}
