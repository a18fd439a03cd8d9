use crate::configuration::QueueSettings;
use crate::domain::registration::ports::{NotifierError, WelcomeNotifier};
use crate::domain::welcome_email::{
    composer::WelcomeEmailComposer, models::job::WelcomeEmailJob, ports::EmailTransport,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::{JoinHandle, JoinSet};

/// Producer side of the welcome email queue. Cloning shares the channel.
#[derive(Debug, Clone)]
pub struct WelcomeEmailQueue {
    sender: mpsc::Sender<WelcomeEmailJob>,
}

impl WelcomeEmailQueue {
    /// Spawns the delivery worker and returns the handle used to enqueue jobs.
    /// The worker stops once every `WelcomeEmailQueue` clone has been dropped
    /// and the remaining jobs and in-flight deliveries are done.
    pub fn start<T: EmailTransport>(
        transport: Arc<T>,
        composer: WelcomeEmailComposer,
        configuration: &QueueSettings,
    ) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::channel(configuration.capacity.max(1));
        let worker = WelcomeEmailWorker {
            transport,
            composer,
            max_attempts: configuration.max_attempts.max(1),
            retry_delay: configuration.retry_delay(),
            max_concurrent_deliveries: configuration.max_concurrent_deliveries.max(1),
        };
        let handle = tokio::spawn(worker.run(receiver));
        (Self { sender }, handle)
    }
}

#[async_trait]
impl WelcomeNotifier for WelcomeEmailQueue {
    /// Never waits for room in the queue. A full queue drops the job.
    #[tracing::instrument(name = "Queueing welcome email", skip(self, job))]
    async fn notify(&self, job: WelcomeEmailJob) -> Result<(), NotifierError> {
        match self.sender.try_send(job) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(job)) => {
                tracing::error!(
                    recipient = %job.recipient,
                    "Welcome email queue is full. Dropping the job",
                );
                Ok(())
            }
            Err(TrySendError::Closed(_)) => Err(NotifierError::QueueClosed),
        }
    }
}

struct WelcomeEmailWorker<T: EmailTransport> {
    transport: Arc<T>,
    composer: WelcomeEmailComposer,
    max_attempts: u32,
    retry_delay: Duration,
    max_concurrent_deliveries: usize,
}

impl<T: EmailTransport> WelcomeEmailWorker<T> {
    async fn run(self, mut receiver: mpsc::Receiver<WelcomeEmailJob>) {
        let limit = self.max_concurrent_deliveries;
        let worker = Arc::new(self);
        let mut deliveries = JoinSet::new();
        while let Some(job) = receiver.recv().await {
            while deliveries.len() >= limit {
                deliveries.join_next().await;
            }
            let worker = Arc::clone(&worker);
            deliveries.spawn(async move {
                // Failures are logged inside; the job is dropped either way.
                let _ = worker.deliver(&job).await;
            });
        }
        while deliveries.join_next().await.is_some() {}
        tracing::info!("Welcome email queue closed, worker stopping");
    }

    #[tracing::instrument(
        name = "Delivering welcome email",
        skip(self, job),
        fields(recipient = %job.recipient)
    )]
    async fn deliver(&self, job: &WelcomeEmailJob) -> Result<(), anyhow::Error> {
        let message = match self.composer.compose(&job.user_name) {
            Ok(message) => message,
            Err(error) => {
                tracing::error!(
                    error.cause_chain = ?error,
                    error.message = %error,
                    "Failed to compose welcome email. Dropping the job",
                );
                return Err(error.into());
            }
        };

        let mut attempt = 1;
        loop {
            match self.transport.send_email(&job.recipient, &message).await {
                Ok(()) => {
                    tracing::info!(attempt, "Welcome email delivered");
                    return Ok(());
                }
                Err(error) if attempt < self.max_attempts => {
                    tracing::warn!(
                        error.cause_chain = ?error,
                        error.message = %error,
                        attempt,
                        "Failed to deliver welcome email. Retrying",
                    );
                    attempt += 1;
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(error) => {
                    tracing::error!(
                        error.cause_chain = ?error,
                        error.message = %error,
                        attempt,
                        "Failed to deliver welcome email. Giving up",
                    );
                    return Err(error.into());
                }
            }
        }
    }
}
