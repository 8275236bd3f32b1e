//! Shared fakes and fixtures for the integration tests.

#![allow(dead_code)]

use madao_governance::{CallOutcome, Clock, Executor, GovernanceConfig, Madao, TokenError, VoteToken};
use madao_types::{Address, Amount, ProposalId, Timestamp};

pub const CHAIRPERSON: Address = Address::from_bytes([0xc0; 20]);
pub const USER1: Address = Address::from_bytes([0x01; 20]);
pub const USER2: Address = Address::from_bytes([0x02; 20]);
pub const USER3: Address = Address::from_bytes([0x03; 20]);
pub const ESCROW: Address = Address::from_bytes([0xee; 20]);
pub const VOTE_TOKEN: Address = Address::from_bytes([0x70; 20]);

pub const MINIMUM_QUORUM: Amount = 1000;
/// 3 days in seconds
pub const DURATION: u64 = 3 * 24 * 60 * 60;
pub const START: Timestamp = 1_700_000_000;
pub const PROPOSAL_ID: ProposalId = 1;

/// How the fake token answers a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reply {
    #[default]
    Accept,
    Refuse,
    Revert,
}

impl Reply {
    fn answer(self) -> Result<bool, TokenError> {
        match self {
            Reply::Accept => Ok(true),
            Reply::Refuse => Ok(false),
            Reply::Revert => Err(TokenError("mock reverted".to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub from: Address,
    pub to: Address,
    pub amount: Amount,
}

/// Vote token whose answers are scripted per method.
#[derive(Debug, Default)]
pub struct FakeToken {
    pub transfer_from_reply: Reply,
    pub transfer_reply: Reply,
    /// Transfers that were accepted
    pub transfers: Vec<Transfer>,
}

impl FakeToken {
    fn settle(&mut self, reply: Reply, from: Address, to: Address, amount: Amount) -> Result<bool, TokenError> {
        let answer = reply.answer();
        if answer == Ok(true) {
            self.transfers.push(Transfer { from, to, amount });
        }
        answer
    }
}

impl VoteToken for FakeToken {
    fn transfer_from(&mut self, owner: Address, spender: Address, amount: Amount) -> Result<bool, TokenError> {
        self.settle(self.transfer_from_reply, owner, spender, amount)
    }

    fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> Result<bool, TokenError> {
        self.settle(self.transfer_reply, from, to, amount)
    }
}

/// Executor that records every call and succeeds unless told to revert.
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    pub revert: bool,
    pub calls: Vec<(Address, Vec<u8>)>,
}

impl Executor for ScriptedExecutor {
    fn call(&mut self, target: Address, payload: &[u8]) -> CallOutcome {
        self.calls.push((target, payload.to_vec()));
        if self.revert {
            CallOutcome::reverted(b"transferFrom reverted".to_vec())
        } else {
            CallOutcome::success(vec![0u8; 31].into_iter().chain([1u8]).collect())
        }
    }
}

/// Clock moved forward by hand.
#[derive(Debug, Clone, Copy)]
pub struct ManualClock {
    pub now: Timestamp,
}

impl ManualClock {
    pub fn advance(&mut self, seconds: u64) {
        self.now += seconds;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now
    }
}

pub type TestDao = Madao<FakeToken, ScriptedExecutor, ManualClock>;

pub fn config() -> GovernanceConfig {
    GovernanceConfig::new(CHAIRPERSON, ESCROW, VOTE_TOKEN)
        .with_minimum_quorum(MINIMUM_QUORUM)
        .with_voting_duration(DURATION)
}

/// Calldata for `transferFrom(escrow, chairperson, 1000)` on the vote token.
pub fn transfer_payload() -> Vec<u8> {
    let mut payload = vec![0x23, 0xb8, 0x72, 0xdd];
    for word in [ESCROW, CHAIRPERSON] {
        payload.extend_from_slice(&[0u8; 12]);
        payload.extend_from_slice(word.as_bytes());
    }
    let mut amount = [0u8; 32];
    amount[16..].copy_from_slice(&1000u128.to_be_bytes());
    payload.extend_from_slice(&amount);
    payload
}

/// Engine with a single open proposal, id 1.
pub fn deploy() -> TestDao {
    let mut dao = Madao::new(
        config(),
        FakeToken::default(),
        ScriptedExecutor::default(),
        ManualClock { now: START },
    )
    .unwrap();

    dao.add_proposal(
        CHAIRPERSON,
        VOTE_TOKEN,
        transfer_payload(),
        "transfer 1000 vote tokens to chairperson",
    )
    .unwrap();
    dao
}

/// Move past the voting window plus `slack` seconds.
pub fn delay(dao: &mut TestDao, slack: u64) {
    dao.clock_mut().advance(DURATION + slack);
}
