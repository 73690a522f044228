//! The `mysql` command-line client runner.

use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver};
use pbxflow_core::config::StoreConfig;
use pbxflow_core::errors::StoreError;

use super::rows::parse_batch_output;
use super::{Row, SqlRunner};

/// Poll interval while waiting for the child process.
const WAIT_POLL: Duration = Duration::from_millis(25);

/// Runs each query as `mysql -N -B -e <sql> <database>`.
///
/// `-N` suppresses the header row, `-B` selects tab-separated batch
/// output. Every call spawns a fresh process; there is no connection
/// state to manage or leak.
pub struct MysqlCliClient {
    client: String,
    database: String,
    timeout: Duration,
}

impl MysqlCliClient {
    pub fn new(client: impl Into<String>, database: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: client.into(),
            database: database.into(),
            timeout,
        }
    }

    /// Build a client from the store configuration.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(
            config.effective_client(),
            config.effective_database(),
            Duration::from_secs(config.effective_query_timeout_seconds()),
        )
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// Verify the store is reachable at all. Failure here is fatal for an
    /// extraction run.
    pub fn check_connection(&self) -> Result<(), StoreError> {
        self.run("SELECT 1")
            .map(|_| ())
            .map_err(|e| StoreError::ConnectionFailed {
                message: e.to_string(),
            })
    }

    /// Wait for the child with a deadline, draining stdout/stderr on
    /// reader threads so a chatty query cannot deadlock the pipe.
    fn wait_with_timeout(&self, mut child: Child) -> Result<(bool, String, String), StoreError> {
        let stdout_rx = drain(child.stdout.take());
        let stderr_rx = drain(child.stderr.take());

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(StoreError::QueryTimeout {
                            database: self.database.clone(),
                            seconds: self.timeout.as_secs(),
                        });
                    }
                    std::thread::sleep(WAIT_POLL);
                }
                Err(e) => {
                    return Err(StoreError::QueryFailed {
                        database: self.database.clone(),
                        message: format!("wait failed: {e}"),
                    });
                }
            }
        };

        let stdout = collect(stdout_rx);
        let stderr = collect(stderr_rx);
        Ok((status.success(), stdout, stderr))
    }
}

impl SqlRunner for MysqlCliClient {
    fn run(&self, sql: &str) -> Result<Vec<Row>, StoreError> {
        let child = Command::new(&self.client)
            .arg("-N")
            .arg("-B")
            .arg("-e")
            .arg(sql)
            .arg(&self.database)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| StoreError::ClientSpawn {
                client: self.client.clone(),
                message: e.to_string(),
            })?;

        let (success, stdout, stderr) = self.wait_with_timeout(child)?;

        if !success {
            return Err(StoreError::QueryFailed {
                database: self.database.clone(),
                message: first_line(&stderr),
            });
        }

        Ok(parse_batch_output(&stdout))
    }
}

/// Read a pipe to EOF on a dedicated thread.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<Receiver<String>> {
    let mut pipe = pipe?;
    let (tx, rx) = bounded(1);
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());
    });
    Some(rx)
}

/// Collect a drained pipe. The child has exited, so the reader hits EOF
/// promptly; the receive timeout only guards against a wedged pipe.
fn collect(rx: Option<Receiver<String>>) -> String {
    rx.and_then(|rx| rx.recv_timeout(Duration::from_secs(5)).ok())
        .unwrap_or_default()
}

fn first_line(stderr: &str) -> String {
    stderr
        .lines()
        .find(|l| !l.trim().is_empty())
        .unwrap_or("client exited with an error")
        .trim()
        .to_string()
}
