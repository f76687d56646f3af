use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match patient_data_lib::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("patient-data: {e}");
            ExitCode::FAILURE
        }
    }
}
