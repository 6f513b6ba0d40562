use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let result = hotel_core::run_service(
        &room_service::DEFAULTS,
        room_service::MIGRATIONS,
        room_service::router,
    )
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=service_exit module=main status=error error={err}");
            eprintln!("room_service: {err}");
            ExitCode::FAILURE
        }
    }
}
