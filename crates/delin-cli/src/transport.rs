use anyhow::Result;
use delin_lib::{analyze_request, DelineationReport, PipelineConfig};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, BufReader, Write};

/// Serve delineation requests, one JSON object per line, until EOF.
pub fn run_stdio(cfg: &PipelineConfig) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    serve(BufReader::new(stdin.lock()), &mut stdout.lock(), cfg)
}

fn serve<R: BufRead>(mut reader: R, writer: &mut dyn Write, cfg: &PipelineConfig) -> Result<()> {
    info!("Listening for delineation requests on stdin/stdout");
    loop {
        let mut line = String::new();
        let bytes = reader.read_line(&mut line)?;
        if bytes == 0 {
            info!("EOF reached, stopping delineation transport");
            break;
        }

        if line.trim().is_empty() {
            continue;
        }

        let request: DelineationRequest = match serde_json::from_str(&line) {
            Ok(req) => req,
            Err(err) => {
                error!("failed to parse request: {}", err);
                let response = DelineationResponse::error(None, 400, err.to_string());
                write_response(writer, &response)?;
                continue;
            }
        };

        let now = chrono::Local::now().naive_local();
        let response = match analyze_request(
            request.payload.as_deref().map(str::as_bytes),
            request.start_datetime.as_deref(),
            now,
            cfg,
        ) {
            Ok(result) => DelineationResponse::ok(request.id, result.report()),
            Err(err) => {
                error!("request {:?} failed: {}", request.id, err);
                DelineationResponse::error(request.id, err.status_code(), err.to_string())
            }
        };

        write_response(writer, &response)?;
    }

    Ok(())
}

fn write_response(writer: &mut dyn Write, response: &DelineationResponse) -> Result<()> {
    let serialized = serde_json::to_string(response)?;
    writer.write_all(serialized.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct DelineationRequest {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    payload: Option<String>,
    #[serde(default)]
    start_datetime: Option<String>,
}

#[derive(Debug, Serialize)]
struct DelineationResponse {
    id: Option<String>,
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<DelineationReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl DelineationResponse {
    fn ok(id: Option<String>, result: DelineationReport) -> Self {
        Self {
            id,
            status: 200,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Option<String>, status: u16, err: String) -> Self {
        Self {
            id,
            status,
            result: None,
            error: Some(err),
        }
    }
}
