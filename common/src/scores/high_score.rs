use std::sync::Arc;

use crate::{Account, UserId, log};
use super::{LocalScoreStore, RemoteScoreStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HighScoreUpdate {
    pub previous: u32,
    pub high_score: u32,
    pub is_new_record: bool,
}

pub struct HighScoreKeeper<L, R>
where
    L: LocalScoreStore,
    R: RemoteScoreStore,
{
    local: L,
    remote: Option<Arc<R>>,
    account: Option<Account>,
    local_high: u32,
    remote_high: u32,
}

impl<L, R> HighScoreKeeper<L, R>
where
    L: LocalScoreStore,
    R: RemoteScoreStore,
{
    pub fn new(local: L, remote: Option<Arc<R>>) -> Self {
        let local_high = match local.read_high_score() {
            Ok(score) => score,
            Err(e) => {
                log!("Failed to read local high score, starting from 0: {}", e);
                0
            }
        };

        Self {
            local,
            remote,
            account: None,
            local_high,
            remote_high: 0,
        }
    }

    pub fn high_score(&self) -> u32 {
        self.local_high.max(self.remote_high)
    }

    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    pub fn sign_in(&mut self, account: Account) -> bool {
        if self.remote.is_none() {
            log!("Cannot sign in {}: no remote score store configured", account.user_id);
            return false;
        }
        log!("Signed in as {} ({})", account.display_name, account.user_id);
        self.account = Some(account);
        self.remote_high = 0;
        true
    }

    pub fn sign_out(&mut self) {
        if let Some(account) = self.account.take() {
            log!("Signed out {}", account.user_id);
        }
        self.remote_high = 0;
    }

    pub fn apply_remote_high_score(&mut self, user_id: &UserId, score: u32) -> bool {
        let Some(account) = self.account.as_ref() else {
            return false;
        };
        if &account.user_id != user_id {
            return false;
        }

        let before = self.high_score();
        self.remote_high = self.remote_high.max(score);
        self.high_score() != before
    }

    pub fn refresh_remote<F>(&self, on_loaded: F)
    where
        F: FnOnce(UserId, u32) + Send + 'static,
    {
        let (Some(store), Some(account)) = (self.remote.clone(), self.account.clone()) else {
            return;
        };

        tokio::spawn(async move {
            match store.read_high_score(&account.user_id).await {
                Ok(score) => on_loaded(account.user_id, score),
                Err(e) => log!("Failed to read remote high score for {}: {}", account.user_id, e),
            }
        });
    }

    pub fn record(&mut self, score: u32) -> HighScoreUpdate {
        let previous = self.high_score();

        if score > self.local_high {
            self.local_high = score;
            if let Err(e) = self.local.write_high_score(score) {
                log!("Failed to save local high score {}: {}", score, e);
            }
        }

        if let (Some(store), Some(account)) = (self.remote.clone(), self.account.clone())
            && score > self.remote_high
        {
            self.remote_high = score;
            tokio::spawn(async move {
                match store
                    .write_high_score(&account.user_id, score, &account.display_name)
                    .await
                {
                    Ok(()) => log!("High score {} saved for {}", score, account.display_name),
                    Err(e) => log!("Failed to save remote high score for {}: {}", account.user_id, e),
                }
            });
        }

        HighScoreUpdate {
            previous,
            high_score: self.high_score(),
            is_new_record: score > previous,
        }
    }
}
