//! The governance engine.
//!
//! [`Madao`] owns the configuration, the [`GovernanceState`] and the three
//! collaborators. Every entry point takes `&mut self` and validates before it
//! writes, so a failed call leaves no trace and no call can interleave with
//! another, including from inside a collaborator.

use madao_types::{Address, Amount, ProposalId};

use crate::collaborators::{Clock, Executor, VoteToken};
use crate::config::{ConfigError, GovernanceConfig};
use crate::delegation;
use crate::error::GovernanceError;
use crate::finalizer;
use crate::proposal::{Proposal, ProposalStatus};
use crate::state::GovernanceState;
use crate::voting;

/// Deposit-weighted voting engine.
#[derive(Debug)]
pub struct Madao<T, X, C> {
    config: GovernanceConfig,
    state: GovernanceState,
    token: T,
    executor: X,
    clock: C,
}

impl<T: VoteToken, X: Executor, C: Clock> Madao<T, X, C> {
    /// Create an engine with empty state.
    pub fn new(config: GovernanceConfig, token: T, executor: X, clock: C) -> Result<Self, ConfigError> {
        Self::from_state(config, GovernanceState::new(), token, executor, clock)
    }

    /// Resume an engine from previously persisted state.
    pub fn from_state(
        config: GovernanceConfig,
        state: GovernanceState,
        token: T,
        executor: X,
        clock: C,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        tracing::info!(
            "Governance engine ready: chairperson={}, vote_token={}, quorum={}, voting_duration={}s, proposals={}",
            config.chairperson,
            config.vote_token,
            config.minimum_quorum,
            config.voting_duration,
            state.proposals.len()
        );

        Ok(Self {
            config,
            state,
            token,
            executor,
            clock,
        })
    }

    pub fn config(&self) -> &GovernanceConfig {
        &self.config
    }

    pub fn state(&self) -> &GovernanceState {
        &self.state
    }

    pub fn token(&self) -> &T {
        &self.token
    }

    pub fn token_mut(&mut self) -> &mut T {
        &mut self.token
    }

    pub fn executor(&self) -> &X {
        &self.executor
    }

    pub fn executor_mut(&mut self) -> &mut X {
        &mut self.executor
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Escrow `amount` vote tokens from `member`.
    ///
    /// Returns the member's new deposit.
    pub fn deposit(&mut self, member: Address, amount: Amount) -> Result<Amount, GovernanceError> {
        match self
            .state
            .ledger
            .deposit(&mut self.token, self.config.escrow, member, amount)
        {
            Ok(balance) => {
                tracing::info!(
                    "Deposit: member={}, amount={}, balance={}, escrowed={}",
                    member,
                    amount,
                    balance,
                    self.state.ledger.total_deposited()
                );
                Ok(balance)
            }
            Err(e @ GovernanceError::TransferFailed(_)) => {
                tracing::warn!("Deposit of {} by {} failed: {}", amount, member, e);
                Err(e)
            }
            Err(e) => {
                tracing::debug!("Deposit of {} by {} rejected: {}", amount, member, e);
                Err(e)
            }
        }
    }

    /// Return `member`'s whole deposit.
    ///
    /// Returns the amount paid out.
    pub fn withdraw(&mut self, member: Address) -> Result<Amount, GovernanceError> {
        match self
            .state
            .ledger
            .withdraw(&mut self.token, self.config.escrow, member, &self.state.locks)
        {
            Ok(amount) => {
                tracing::info!(
                    "Withdraw: member={}, amount={}, escrowed={}",
                    member,
                    amount,
                    self.state.ledger.total_deposited()
                );
                Ok(amount)
            }
            Err(e @ GovernanceError::TransferFailed(_)) => {
                tracing::warn!("Withdraw by {} failed: {}", member, e);
                Err(e)
            }
            Err(e) => {
                tracing::debug!("Withdraw by {} rejected: {}", member, e);
                Err(e)
            }
        }
    }

    /// Raise a proposal to call `recipient` with `payload`. Chairperson only.
    pub fn add_proposal(
        &mut self,
        caller: Address,
        recipient: Address,
        payload: Vec<u8>,
        description: impl Into<String>,
    ) -> Result<ProposalId, GovernanceError> {
        if caller != self.config.chairperson {
            tracing::debug!("Proposal by {} rejected: not the chairperson", caller);
            return Err(GovernanceError::Unauthorized(
                "Only chairperson can add proposals".to_string(),
            ));
        }

        let deadline = self.clock.now().saturating_add(self.config.voting_duration);
        let description = description.into();
        let id = self
            .state
            .proposals
            .create(recipient, payload, description.clone(), deadline);

        tracing::info!(
            "Proposal #{} added: recipient={}, deadline={}, description={:?}",
            id,
            recipient,
            deadline,
            description
        );
        Ok(id)
    }

    /// Hand `delegator`'s ballot on proposal `id` to `delegate`.
    ///
    /// Returns the weight credited to the delegate.
    pub fn delegate(
        &mut self,
        delegator: Address,
        delegate: Address,
        id: ProposalId,
    ) -> Result<Amount, GovernanceError> {
        let now = self.clock.now();
        let state = &mut self.state;
        let result = state.proposals.record_mut(id).and_then(|record| {
            delegation::delegate(record, &state.ledger, &mut state.locks, delegator, delegate, now)
        });

        match result {
            Ok(weight) => {
                tracing::info!(
                    "Delegation on #{}: {} -> {}, weight={}",
                    id,
                    delegator,
                    delegate,
                    weight
                );
                Ok(weight)
            }
            Err(e) => {
                tracing::debug!("Delegation on #{} by {} rejected: {}", id, delegator, e);
                Err(e)
            }
        }
    }

    /// Cast `voter`'s ballot on proposal `id`.
    ///
    /// Returns the weight added to the tally.
    pub fn vote(&mut self, voter: Address, id: ProposalId, in_favor: bool) -> Result<Amount, GovernanceError> {
        let now = self.clock.now();
        let state = &mut self.state;
        let result = state.proposals.record_mut(id).and_then(|record| {
            voting::cast_vote(record, &state.ledger, &mut state.locks, voter, in_favor, now)
        });

        match result {
            Ok(weight) => {
                tracing::info!(
                    "Vote on #{}: voter={}, in_favor={}, weight={}",
                    id,
                    voter,
                    in_favor,
                    weight
                );
                if let Ok(delegators) = self.delegators_of(id, &voter) {
                    if !delegators.is_empty() {
                        tracing::debug!("Vote on #{} by {} carries delegations from {:?}", id, voter, delegators);
                    }
                }
                Ok(weight)
            }
            Err(e) => {
                tracing::debug!("Vote on #{} by {} rejected: {}", id, voter, e);
                Err(e)
            }
        }
    }

    /// Close proposal `id` once its deadline has passed.
    ///
    /// Returns the terminal status.
    pub fn finish(&mut self, id: ProposalId) -> Result<ProposalStatus, GovernanceError> {
        let now = self.clock.now();
        let minimum_quorum = self.config.minimum_quorum;
        let state = &mut self.state;
        let executor = &mut self.executor;
        let result = state.proposals.record_mut(id).and_then(|record| {
            finalizer::finish(record, &mut state.locks, executor, minimum_quorum, now)
        });

        match result {
            Ok(status) => {
                tracing::info!("Proposal #{} finished with status {:?}", id, status);
                Ok(status)
            }
            Err(e) => {
                tracing::debug!("Finish of #{} rejected: {}", id, e);
                Err(e)
            }
        }
    }

    pub fn get_proposal(&self, id: ProposalId) -> Result<&Proposal, GovernanceError> {
        self.state.proposals.record(id).map(|r| &r.proposal)
    }

    /// Proposals still waiting for `finish`.
    pub fn open_proposals(&self) -> Vec<&Proposal> {
        self.state.proposals.open()
    }

    /// Members who handed their ballot on proposal `id` directly to `delegate`.
    pub fn delegators_of(&self, id: ProposalId, delegate: &Address) -> Result<Vec<Address>, GovernanceError> {
        self.state
            .proposals
            .record(id)
            .map(|r| delegation::delegators_of(&r.ballots, delegate))
    }

    pub fn get_deposit(&self, member: &Address) -> Amount {
        self.state.ledger.balance_of(member)
    }

    /// Open proposals `member` currently participates in.
    pub fn active_locks(&self, member: &Address) -> u32 {
        self.state.locks.count(member)
    }

    pub fn proposal_count(&self) -> usize {
        self.state.proposals.len()
    }

    /// Whether `member` voted or delegated on proposal `id`.
    pub fn has_voted(&self, id: ProposalId, member: &Address) -> Result<bool, GovernanceError> {
        self.state
            .proposals
            .record(id)
            .map(|r| r.ballots.has_ballot(member))
    }
}
