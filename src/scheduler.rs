//! Check cycle scheduling
//!
//! One logical thread of control: the scheduler, checker and journal run
//! cooperatively on a single timeline. No two cycles ever overlap.

use crate::checker::check_all;
use crate::config::Config;
use crate::driver::PageDriver;
use crate::errors::Result;
use crate::journal::Journal;
use crate::sites::load_sites;
use chrono::Local;
use std::sync::Arc;
use tracing::{error, info};

pub struct Scheduler {
    config: Config,
    driver: Arc<dyn PageDriver>,
    journal: Journal,
}

impl Scheduler {
    pub fn new(config: Config, driver: Arc<dyn PageDriver>, journal: Journal) -> Self {
        Self {
            config,
            driver,
            journal,
        }
    }

    /// Run the first cycle immediately, then repeat forever
    ///
    /// The wait is measured from cycle completion, not cycle start: a
    /// cycle that overruns the interval is followed by the next one right
    /// after the full wait, with no catch-up and no overlap. A cycle error
    /// is diagnostic output only; the loop never stops.
    pub async fn run(&self) {
        let mut cycle: u64 = 1;

        loop {
            if let Err(e) = self.run_cycle().await {
                error!("Error in check cycle {}: {}", cycle, e);
            }

            tokio::time::sleep(self.config.check_interval).await;
            cycle += 1;
            info!("Timer ticked (run {})", cycle);
        }
    }

    /// One full pass over the current site list
    ///
    /// The list is re-read every cycle, and every journal line of the
    /// cycle shares the timestamp taken here. A missing or unreadable
    /// list becomes a single synthetic journal entry; the cycle is over,
    /// the scheduler is not.
    async fn run_cycle(&self) -> Result<()> {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        let lines = match load_sites(&self.config.site_list_path).await {
            Ok(urls) => {
                info!("Checking {} sites...", urls.len());
                let results =
                    check_all(self.driver.as_ref(), &urls, self.config.settle_duration).await;
                self.journal.append(&stamp, &results).await?
            }
            Err(e) => vec![self.journal.append_failure(&stamp, &e.to_string()).await?],
        };

        for line in &lines {
            info!("{}", line);
        }

        Ok(())
    }
}
