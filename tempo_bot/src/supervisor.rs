use crate::command::{Reply, Router};
use crate::config::BotConfig;

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::sleep;
use tokio_rustls::TlsConnector;

use tempo_engine::{format_timebox, now, Engine, StateStore};
use tempo_irc::{ConnectionError, LineReader, MessageChunker, ServerMessage, MAX_CHUNK_BYTES};

/// Delay before the first reconnection attempt, and the value the delay
/// resets to on any liveness signal
const RETRY_FLOOR: Duration = Duration::from_secs(1);

/// The reconnection delay doubles on every failure up to this cap
const RETRY_CAP: Duration = Duration::from_secs(3600);

trait BotStream: AsyncRead + AsyncWrite + Unpin + Send {}
impl<T: AsyncRead + AsyncWrite + Unpin + Send> BotStream for T {}

/// Owns the socket lifecycle and the processing loop.
///
/// One connection attempt walks connect → authenticate → join → active;
/// each active iteration polls for at most one line, routes any channel or
/// private message, then runs the timebox sweeps and persists the
/// snapshot. Any error tears the connection down and the outer loop
/// reconnects with capped exponential backoff, forever.
pub struct Supervisor {
    config: BotConfig,
    router: Router,
    engine: Engine,
    store: StateStore,
    retry_delay: Duration,
}

impl Supervisor {
    pub fn new(config: BotConfig, engine: Engine, store: StateStore) -> Self {
        let router = Router::new(
            config.nick.clone(),
            config.prefix.clone(),
            config.bridge_nick.clone(),
            config.block.clone(),
        );
        Self {
            config,
            router,
            engine,
            store,
            retry_delay: RETRY_FLOOR,
        }
    }

    /// Run forever. The only exit is process termination.
    pub async fn run(&mut self) -> Result<(), anyhow::Error> {
        loop {
            if let Err(e) = self.run_connection().await {
                tracing::error!("Client encountered error: {:#}", e);
            }
            tracing::info!("Reconnecting in {} s", self.retry_delay.as_secs());
            sleep(self.retry_delay).await;
            self.retry_delay = next_delay(self.retry_delay);
        }
    }

    async fn run_connection(&mut self) -> Result<(), anyhow::Error> {
        tracing::info!("Connecting to {}:{} ...", self.config.host, self.config.port);
        let stream = self.connect().await?;
        let (read_half, mut writer) = tokio::io::split(stream);
        let mut reader = LineReader::new(read_half);

        tracing::info!("Authenticating ...");
        send_line(&mut writer, &format!("PASS {}", self.config.password)).await?;
        send_line(&mut writer, &format!("NICK {}", self.config.nick)).await?;
        send_line(
            &mut writer,
            &format!(
                "USER {nick} {nick} {host} :{nick}",
                nick = self.config.nick,
                host = self.config.host
            ),
        )
        .await?;

        tracing::info!("Joining channels ...");
        for channel in &self.config.channels {
            send_line(&mut writer, &format!("JOIN {}", channel)).await?;
        }

        tracing::info!("Receiving messages ...");
        self.retry_delay = RETRY_FLOOR;
        loop {
            if let Some(line) = reader.poll_line().await? {
                self.handle_line(&mut writer, &line).await?;
            }

            // Sweeps and persistence run every iteration whether or not a
            // line arrived; a failure here is logged and retried next cycle
            if let Err(e) = self.run_periodic(&mut writer).await {
                tracing::error!("Task processor encountered error: {:#}", e);
            }
        }
    }

    async fn connect(&self) -> Result<Box<dyn BotStream>, anyhow::Error> {
        let tcp = TcpStream::connect((self.config.host.as_str(), self.config.port)).await?;
        if !self.config.tls {
            return Ok(Box::new(tcp));
        }

        let mut roots = rustls::RootCertStore::empty();
        roots.add_server_trust_anchors(webpki_roots::TLS_SERVER_ROOTS.0.iter().map(|ta| {
            rustls::OwnedTrustAnchor::from_subject_spki_name_constraints(
                ta.subject,
                ta.spki,
                ta.name_constraints,
            )
        }));
        let tls_config = rustls::ClientConfig::builder()
            .with_safe_defaults()
            .with_root_certificates(roots)
            .with_no_client_auth();
        let connector = TlsConnector::from(Arc::new(tls_config));
        let server_name = rustls::ServerName::try_from(self.config.host.as_str())
            .map_err(|_| ConnectionError::Tls(format!("invalid server name: {}", self.config.host)))?;

        let stream = connector.connect(server_name, tcp).await?;
        Ok(Box::new(stream))
    }

    async fn handle_line<W: AsyncWrite + Unpin>(
        &mut self,
        writer: &mut W,
        line: &str,
    ) -> Result<(), anyhow::Error> {
        tracing::debug!("recv: {}", line);

        let Some(message) = ServerMessage::parse(line) else {
            tracing::warn!("Ignoring malformed line");
            return Ok(());
        };

        match message.command.as_str() {
            "PING" => {
                let token = message.trailing.as_deref().unwrap_or_default();
                send_line(writer, &format!("PONG :{}", token)).await?;
                self.retry_delay = RETRY_FLOOR;
            }
            "PRIVMSG" => {
                tracing::info!(
                    "sender: {:?}; middle: {:?}; trailing: {:?}",
                    message.source,
                    message.middle,
                    message.trailing
                );
                if let (Some(sender), Some(recipient), Some(text)) =
                    (&message.source, &message.middle, &message.trailing)
                {
                    let reply = self.router.route(&mut self.engine, sender, recipient, text, now());
                    if let Some(reply) = reply {
                        self.send_reply(writer, reply).await?;
                    }
                    self.retry_delay = RETRY_FLOOR;
                }
            }
            _ => {}
        }

        Ok(())
    }

    /// Send reply lines with the first immediate and each subsequent one
    /// rate-limited by a one second delay.
    async fn send_reply<W: AsyncWrite + Unpin>(
        &self,
        writer: &mut W,
        reply: Reply,
    ) -> Result<(), ConnectionError> {
        let mut throttle = Duration::ZERO;
        for line in &reply.lines {
            sleep(throttle).await;
            send_message(writer, &reply.audience, line).await?;
            throttle = Duration::from_secs(1);
        }
        Ok(())
    }

    async fn run_periodic<W: AsyncWrite + Unpin>(
        &mut self,
        writer: &mut W,
    ) -> Result<(), anyhow::Error> {
        let current_time = now();

        for completion in self.engine.sweep_completions(current_time) {
            let notice = format!(
                "Completed timebox in {}: {}",
                completion.audience_key,
                format_timebox(&completion.person, &completion.timebox)
            );
            send_message(writer, &completion.audience, &notice).await?;
        }

        self.engine.sweep_retention(current_time);
        self.store.save(self.engine.snapshot())?;

        Ok(())
    }
}

fn next_delay(delay: Duration) -> Duration {
    (delay * 2).min(RETRY_CAP)
}

async fn send_line<W: AsyncWrite + Unpin>(
    writer: &mut W,
    line: &str,
) -> Result<(), ConnectionError> {
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\r\n").await?;
    writer.flush().await?;
    tracing::debug!("sent: {}", line);
    Ok(())
}

async fn send_message<W: AsyncWrite + Unpin>(
    writer: &mut W,
    recipient: &str,
    message: &str,
) -> Result<(), ConnectionError> {
    for chunk in MessageChunker::new(message, MAX_CHUNK_BYTES) {
        send_line(writer, &format!("PRIVMSG {} :{}", recipient, chunk)).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    #[test]
    fn retry_delay_doubles_to_cap() {
        let mut delay = RETRY_FLOOR;
        let mut seen = Vec::new();
        for _ in 0..14 {
            seen.push(delay.as_secs());
            delay = next_delay(delay);
        }
        assert_eq!(
            seen,
            vec![1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048, 3600, 3600]
        );
    }

    #[tokio::test]
    async fn send_message_splits_into_privmsgs() {
        let (mut tx, mut rx) = tokio::io::duplex(4096);

        send_message(&mut tx, "#chan", "one\ntwo").await.unwrap();
        drop(tx);

        let mut sent = String::new();
        rx.read_to_string(&mut sent).await.unwrap();
        assert_eq!(sent, "PRIVMSG #chan :one\r\nPRIVMSG #chan :two\r\n");
    }

    #[tokio::test]
    async fn send_line_appends_terminator() {
        let (mut tx, mut rx) = tokio::io::duplex(4096);

        send_line(&mut tx, "PONG :token").await.unwrap();
        drop(tx);

        let mut sent = String::new();
        rx.read_to_string(&mut sent).await.unwrap();
        assert_eq!(sent, "PONG :token\r\n");
    }
}
