use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let result = hotel_core::run_service(
        &reservation_service::DEFAULTS,
        reservation_service::MIGRATIONS,
        reservation_service::router,
    )
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=service_exit module=main status=error error={err}");
            eprintln!("reservation_service: {err}");
            ExitCode::FAILURE
        }
    }
}
