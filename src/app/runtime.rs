use super::command::{Command, HELP_TEXT};
use super::{Notice, ScannerApp, ShutdownReason};
use crate::error::Result;
use crate::events::{spawn_metrics_collector, EventFilter, EventMetrics};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

impl ScannerApp {
    /// Run the interactive loop on stdin/stdout with signal handling
    pub async fn run(&mut self) -> Result<i32> {
        info!("QR scanner is running");

        let metrics = Arc::new(Mutex::new(EventMetrics::default()));
        let collector = spawn_metrics_collector(
            self.event_bus
                .subscribe_filtered(EventFilter::All, "session-metrics"),
            Arc::clone(&metrics),
        );

        let reader = BufReader::new(tokio::io::stdin());
        let reason = self
            .run_with(reader, tokio::io::stdout(), wait_for_signal())
            .await?;

        info!("Shutdown initiated: {}", reason);
        let exit_code = self.shutdown(reason);

        // Let the collector drain the shutdown event before stopping it
        tokio::task::yield_now().await;
        collector.abort();
        {
            let metrics = metrics.lock();
            info!(
                "Session saw {} events ({} scans recorded, {} actions)",
                metrics.total_events,
                metrics.count("scan_recorded"),
                metrics.count("action_dispatched")
            );
        }

        info!("QR scanner shutdown complete");
        Ok(exit_code)
    }

    /// Read commands from `reader` until quit, end of input, `shutdown`
    /// resolving or the app being cancelled
    pub async fn run_with<R, W, F>(
        &mut self,
        reader: R,
        mut writer: W,
        shutdown: F,
    ) -> Result<ShutdownReason>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
        F: Future<Output = ShutdownReason>,
    {
        let mut lines = reader.lines();
        let cancellation_token = self.cancellation_token.clone();
        tokio::pin!(shutdown);

        writer.write_all(b"Type 'help' for commands\n").await?;

        let reason = loop {
            let prompt = format!("{}> ", self.screen().name());
            writer.write_all(prompt.as_bytes()).await?;
            writer.flush().await?;

            let line = tokio::select! {
                reason = &mut shutdown => break reason,
                _ = cancellation_token.cancelled() => break ShutdownReason::UserRequest,
                line = lines.next_line() => line?,
            };

            let Some(line) = line else {
                break ShutdownReason::EndOfInput;
            };

            if line.trim().is_empty() {
                continue;
            }

            let output = match line.parse::<Command>() {
                Ok(Command::Quit) => break ShutdownReason::UserRequest,
                Ok(command) => {
                    debug!("Executing {:?}", command);
                    self.execute(command).await
                }
                Err(message) => message,
            };

            writer.write_all(output.as_bytes()).await?;
            writer.write_all(b"\n").await?;
        };

        writer.flush().await?;
        Ok(reason)
    }

    /// Apply one command and render what the user should see
    pub async fn execute(&mut self, command: Command) -> String {
        let notice = match command {
            Command::SignUp { email, password } => self.create_account(&email, &password).await,
            Command::SignIn { email, password } => self.sign_in(&email, &password).await,
            Command::SignOut => self.sign_out().await,
            Command::Scan => self.enter_scan_mode().await,
            Command::Decode(code) => match self.handle_decode(code) {
                Some(notice) => {
                    let options = self.pending_options().join(" | ");
                    return format!("{}\nOptions: {}", notice, options);
                }
                None => Notice::info("Code ignored"),
            },
            Command::Another => self.scan_another(),
            Command::Open(Some(id)) => self.dispatch_record(id).await,
            Command::Open(None) => self.dispatch_pending().await,
            Command::Copy(Some(id)) => self.copy_record(id),
            Command::Copy(None) => self.copy_pending(),
            Command::Close => self.exit_scan_mode(),
            Command::History => self.history_listing(),
            Command::Clear => self.clear_history(),
            Command::Status => {
                let mut message = self.describe();
                if !self.status().is_empty() {
                    message = format!("{}\n{}", message, self.status());
                }
                Notice::new("Status", message)
            }
            Command::Help => return HELP_TEXT.to_string(),
            Command::Quit => Notice::info("Bye"),
        };

        notice.to_string()
    }
}

/// Resolve on Ctrl-C, or SIGTERM on Unix
async fn wait_for_signal() -> ShutdownReason {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
            return tokio::select! {
                _ = tokio::signal::ctrl_c() => ShutdownReason::Signal("SIGINT".to_string()),
                _ = sigterm.recv() => ShutdownReason::Signal("SIGTERM".to_string()),
            };
        }
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Unable to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    ShutdownReason::Signal("SIGINT".to_string())
}
