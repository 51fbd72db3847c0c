//! Main application orchestration and execution

use crate::{
    cli::Cli,
    client::{HttpClient, NetworkClient},
    config::{display_config_summary, load_config},
    error::{ErrorContext, Result},
    log_debug, log_info, log_warn,
    logging::LoggerFactory,
    models::Config,
    output::{LeakReport, OutputFormatter, OutputFormatterFactory, Spinner},
    probe::{Prober, Token},
};
use std::io::Write;
use std::sync::Arc;

/// Main application struct that coordinates all components
pub struct App {
    cli: Cli,
}

impl App {
    /// Create a new application instance with CLI configuration
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run one leak test and print the report to stdout
    pub async fn run(self) -> Result<()> {
        let config = load_config(self.cli)?;

        let factory = LoggerFactory::new(config.clone());
        let logger = factory.create_logger("APP").await;
        log_debug!(logger, "{} v{} ({})", crate::PKG_NAME, crate::VERSION, crate::build_info());
        log_debug!(logger, "Configuration:\n{}", display_config_summary(&config));

        let client: Arc<dyn HttpClient> = Arc::new(
            NetworkClient::new(&config).context("Failed to build HTTP client")?,
        );
        let prober = Prober::new(client, config.clone(), factory.create_probe_logger().await);
        let mut leak_test = LeakTest::new(prober, config)
            .with_spinner(Spinner::stderr_is_terminal());

        let mut stdout = std::io::stdout();
        let report = leak_test
            .run(&mut stdout)
            .await
            .context("Failed to write leak report")?;
        if report.is_empty() {
            log_warn!(logger, "The leak test service returned no usable records");
        } else {
            log_info!(logger, "Reported {} resolver(s), verdict {:?}", report.resolver_count(), report.verdict());
        }

        Ok(())
    }
}

/// One generate → trigger → fetch → report cycle, writing to any sink
pub struct LeakTest {
    prober: Prober,
    formatter: Box<dyn OutputFormatter>,
    config: Config,
    spinner: bool,
}

impl LeakTest {
    pub fn new(prober: Prober, config: Config) -> Self {
        Self {
            prober,
            formatter: OutputFormatterFactory::create_formatter(config.enable_color),
            config,
            spinner: false,
        }
    }

    /// Draw a progress spinner on stderr during the trigger phase
    pub fn with_spinner(mut self, enabled: bool) -> Self {
        self.spinner = enabled;
        self
    }

    /// Run with a freshly generated token
    pub async fn run<W: Write>(&mut self, out: &mut W) -> Result<LeakReport> {
        let token = self.prober.generate_token();
        self.run_with_token(token, out).await
    }

    /// Run with a known token.
    ///
    /// Fetch failures are printed to `out` and produce an empty report; only
    /// write failures on `out` are returned as errors.
    pub async fn run_with_token<W: Write>(&self, token: Token, out: &mut W) -> Result<LeakReport> {
        let spinner = Spinner::start(
            format!("Gathering results from {} ", self.service_origin()),
            self.spinner,
        );
        let elapsed = self.prober.trigger(token).await;
        spinner.stop().await;

        if self.config.show_elapsed {
            writeln!(out, "{}", self.formatter.format_elapsed(elapsed))?;
        }

        let records = match self.prober.fetch_result(token).await {
            Ok(records) => records,
            Err(e) => {
                self.prober.logger().log_error(&e, "Fetching leak test results").await;
                writeln!(out, "{}", self.formatter.format_error(&e))?;
                Vec::new()
            }
        };

        let report = LeakReport::from_records(&records);
        if !report.is_empty() {
            writeln!(out, "{}", self.formatter.format_report(&report))?;
        }
        out.flush()?;

        Ok(report)
    }

    /// Scheme and host of the result service, for the spinner prefix
    fn service_origin(&self) -> String {
        url::Url::parse(&self.config.result_url(crate::defaults::TOKEN_MIN))
            .map(|u| u.origin().ascii_serialization())
            .unwrap_or_else(|_| self.config.result_url_template.clone())
    }
}
