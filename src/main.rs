mod config;
mod controller;
mod engine;
mod error;
mod playlist;
mod progress;
mod runtime;
mod timefmt;
mod ui;
mod view;

fn main() -> Result<(), error::AppError> {
    runtime::run()
}
