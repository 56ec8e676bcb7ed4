//! Binary save codec: a fixed 20-byte header plus a CRC-checked data
//! section.
//!
//! Header layout (little-endian): magic `u32`, major/minor/patch/reserved
//! `u8` each, data CRC32 `u32`, data length `u64`. A file is readable when
//! the magic matches and the major version equals this build's major.
//! Active encounters are never saved; saving is refused during combat.

use crate::ending::{GodVote, JudgmentVerdict, TrialRecord, TrialSet, TrialStatus, TRIAL_COUNT};
use crate::entities::{Minion, MinionKind, MinionRoster, Soul, SoulKind, SoulVault};
use crate::error::{GameError, GameResult};
use crate::player::{Consciousness, Corruption, CorruptionEvent, PlayerState, Resources};
use std::fs;
use std::path::Path;

/// File magic, `"NECR"` read as a little-endian u32.
pub const MAGIC: u32 = 0x5243_454E;
/// Format major version; files with a different major are rejected.
pub const VERSION_MAJOR: u8 = 1;
const VERSION_MINOR: u8 = 0;
const VERSION_PATCH: u8 = 0;
const HEADER_LEN: usize = 20;

// ---- crc32 ---------------------------------------------------------------

#[allow(clippy::cast_possible_truncation)]
const fn crc_table() -> [u32; 256] {
    let mut table = [0_u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut c = i as u32;
        let mut k = 0;
        while k < 8 {
            c = if c & 1 != 0 { 0xEDB8_8320 ^ (c >> 1) } else { c >> 1 };
            k += 1;
        }
        table[i] = c;
        i += 1;
    }
    table
}

const CRC_TABLE: [u32; 256] = crc_table();

/// CRC32 (reflected, poly `0xEDB88320`) of `data`.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // masked to 8 bits before the cast
pub fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFF_u32;
    for &byte in data {
        let idx = ((crc ^ u32::from(byte)) & 0xFF) as usize;
        crc = CRC_TABLE[idx] ^ (crc >> 8);
    }
    crc ^ 0xFFFF_FFFF
}

// ---- writer --------------------------------------------------------------

fn put_u8(out: &mut Vec<u8>, v: u8) {
    out.push(v);
}

fn put_u16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn put_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn put_f32(out: &mut Vec<u8>, v: f32) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn put_bool(out: &mut Vec<u8>, v: bool) {
    out.push(u8::from(v));
}

fn put_string(out: &mut Vec<u8>, s: &str) -> GameResult<()> {
    let len = u16::try_from(s.len())
        .map_err(|_| GameError::InvalidSaveData("string too long".to_string()))?;
    put_u16(out, len);
    out.extend_from_slice(s.as_bytes());
    Ok(())
}

fn put_count(out: &mut Vec<u8>, n: usize) -> GameResult<()> {
    let n = u16::try_from(n)
        .map_err(|_| GameError::InvalidSaveData("collection too large".to_string()))?;
    put_u16(out, n);
    Ok(())
}

// ---- reader --------------------------------------------------------------

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Reader { data, pos: 0 }
    }

    fn take(&mut self, n: usize) -> GameResult<&'a [u8]> {
        let end = self.pos.checked_add(n).ok_or(GameError::TruncatedSave)?;
        if end > self.data.len() {
            return Err(GameError::TruncatedSave);
        }
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self) -> GameResult<u8> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> GameResult<u16> {
        let mut buf = [0_u8; 2];
        buf.copy_from_slice(self.take(2)?);
        Ok(u16::from_le_bytes(buf))
    }

    fn u32(&mut self) -> GameResult<u32> {
        let mut buf = [0_u8; 4];
        buf.copy_from_slice(self.take(4)?);
        Ok(u32::from_le_bytes(buf))
    }

    fn f32(&mut self) -> GameResult<f32> {
        let mut buf = [0_u8; 4];
        buf.copy_from_slice(self.take(4)?);
        Ok(f32::from_le_bytes(buf))
    }

    fn bool(&mut self) -> GameResult<bool> {
        match self.u8()? {
            0 => Ok(false),
            1 => Ok(true),
            v => Err(GameError::InvalidSaveData(format!("bad bool byte {v}"))),
        }
    }

    fn string(&mut self) -> GameResult<String> {
        let len = usize::from(self.u16()?);
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|_| GameError::InvalidSaveData("non-utf8 string".to_string()))
    }
}

// ---- enum encodings --------------------------------------------------------

fn soul_kind_code(kind: SoulKind) -> u8 {
    // index in SoulKind::ALL is the stable encoding
    SoulKind::ALL
        .iter()
        .position(|&k| k == kind)
        .map_or(0, |p| u8::try_from(p).unwrap_or(0))
}

fn soul_kind_from(code: u8) -> GameResult<SoulKind> {
    SoulKind::ALL
        .get(usize::from(code))
        .copied()
        .ok_or_else(|| GameError::InvalidSaveData(format!("bad soul kind {code}")))
}

fn minion_kind_code(kind: MinionKind) -> u8 {
    MinionKind::ALL
        .iter()
        .position(|&k| k == kind)
        .map_or(0, |p| u8::try_from(p).unwrap_or(0))
}

fn minion_kind_from(code: u8) -> GameResult<MinionKind> {
    MinionKind::ALL
        .get(usize::from(code))
        .copied()
        .ok_or_else(|| GameError::InvalidSaveData(format!("bad minion kind {code}")))
}

fn trial_status_code(status: TrialStatus) -> u8 {
    match status {
        TrialStatus::Locked => 0,
        TrialStatus::Available => 1,
        TrialStatus::InProgress => 2,
        TrialStatus::Passed => 3,
        TrialStatus::Failed => 4,
    }
}

fn trial_status_from(code: u8) -> GameResult<TrialStatus> {
    match code {
        0 => Ok(TrialStatus::Locked),
        1 => Ok(TrialStatus::Available),
        2 => Ok(TrialStatus::InProgress),
        3 => Ok(TrialStatus::Passed),
        4 => Ok(TrialStatus::Failed),
        v => Err(GameError::InvalidSaveData(format!("bad trial status {v}"))),
    }
}

fn vote_code(vote: GodVote) -> u8 {
    match vote {
        GodVote::Approve => 0,
        GodVote::Deny => 1,
        GodVote::Abstain => 2,
    }
}

fn vote_from(code: u8) -> GameResult<GodVote> {
    match code {
        0 => Ok(GodVote::Approve),
        1 => Ok(GodVote::Deny),
        2 => Ok(GodVote::Abstain),
        v => Err(GameError::InvalidSaveData(format!("bad vote byte {v}"))),
    }
}

// ---- data section ----------------------------------------------------------

fn encode_state(state: &PlayerState) -> GameResult<Vec<u8>> {
    let mut out = Vec::new();

    let r = &state.resources;
    for v in [
        r.soul_energy,
        r.mana,
        r.mana_max,
        r.day_count,
        r.time_hours,
        r.day_of_month,
        r.month,
        r.year,
    ] {
        put_u32(&mut out, v);
    }

    put_f32(&mut out, state.corruption.value());
    put_bool(&mut out, state.corruption.is_irreversible());
    put_count(&mut out, state.corruption.events().len())?;
    for event in state.corruption.events() {
        put_u32(&mut out, event.day);
        put_f32(&mut out, event.delta);
        put_string(&mut out, &event.description)?;
    }

    let c = &state.consciousness;
    put_f32(&mut out, c.stability);
    put_f32(&mut out, c.decay_rate);
    put_f32(&mut out, c.fragmentation);
    put_u32(&mut out, c.last_decay_month);

    put_u32(&mut out, state.level);
    put_u32(&mut out, state.experience);
    put_u32(&mut out, state.location);
    put_u32(&mut out, state.civilian_kills);
    put_bool(&mut out, state.maya_saved);

    put_u32(&mut out, state.souls.next_id());
    put_count(&mut out, state.souls.len())?;
    for soul in state.souls.iter() {
        put_u32(&mut out, soul.id);
        put_u8(&mut out, soul_kind_code(soul.kind));
        put_u8(&mut out, soul.quality);
        put_u32(&mut out, soul.harvested_day);
        match soul.binding {
            crate::entities::Binding::BoundTo(minion_id) => {
                put_bool(&mut out, true);
                put_u32(&mut out, minion_id);
            }
            crate::entities::Binding::Free => {
                put_bool(&mut out, false);
                put_u32(&mut out, 0);
            }
        }
    }

    put_u32(&mut out, state.minions.next_id());
    put_count(&mut out, state.minions.len())?;
    for minion in state.minions.iter() {
        put_u32(&mut out, minion.id);
        put_u8(&mut out, minion_kind_code(minion.kind));
        put_string(&mut out, &minion.name)?;
        put_u32(&mut out, minion.level);
        put_u32(&mut out, minion.experience);
        put_u32(&mut out, minion.location);
        match minion.bound_soul {
            Some(soul_id) => {
                put_bool(&mut out, true);
                put_u32(&mut out, soul_id);
            }
            None => {
                put_bool(&mut out, false);
                put_u32(&mut out, 0);
            }
        }
        let s = &minion.stats;
        for v in [s.hp, s.hp_max, s.attack, s.defense, s.speed] {
            put_u32(&mut out, v);
        }
        put_u8(&mut out, s.loyalty);
    }

    for trial in state.trials.records() {
        put_u8(&mut out, trial_status_code(trial.status));
        put_u8(&mut out, trial.attempts);
        put_f32(&mut out, trial.best_score);
        put_bool(&mut out, trial.passed_first_try);
    }

    match &state.judgment {
        Some(verdict) => {
            put_bool(&mut out, true);
            for vote in verdict.votes {
                put_u8(&mut out, vote_code(vote));
            }
        }
        None => put_bool(&mut out, false),
    }

    Ok(out)
}

fn decode_state(data: &[u8]) -> GameResult<PlayerState> {
    let mut r = Reader::new(data);
    let mut state = PlayerState::new(None);

    state.resources = Resources {
        soul_energy: r.u32()?,
        mana: r.u32()?,
        mana_max: r.u32()?,
        day_count: r.u32()?,
        time_hours: r.u32()?,
        day_of_month: r.u32()?,
        month: r.u32()?,
        year: r.u32()?,
    };

    let corruption_value = r.f32()?;
    let irreversible = r.bool()?;
    let event_count = usize::from(r.u16()?);
    let mut events = Vec::with_capacity(event_count);
    for _ in 0..event_count {
        let day = r.u32()?;
        let delta = r.f32()?;
        let description = r.string()?;
        events.push(CorruptionEvent {
            description,
            delta,
            day,
        });
    }
    state.corruption = Corruption::from_parts(corruption_value, irreversible, events);

    state.consciousness = Consciousness {
        stability: r.f32()?,
        decay_rate: r.f32()?,
        fragmentation: r.f32()?,
        last_decay_month: r.u32()?,
    };

    state.level = r.u32()?;
    state.experience = r.u32()?;
    state.location = r.u32()?;
    state.civilian_kills = r.u32()?;
    state.maya_saved = r.bool()?;

    let souls_next_id = r.u32()?;
    let soul_count = usize::from(r.u16()?);
    let mut souls = Vec::with_capacity(soul_count);
    for _ in 0..soul_count {
        let id = r.u32()?;
        let kind = soul_kind_from(r.u8()?)?;
        let quality = r.u8()?;
        let harvested_day = r.u32()?;
        let bound = r.bool()?;
        let minion_id = r.u32()?;
        // energy and memory are derived from kind and quality
        let mut soul = Soul::new(id, kind, quality, harvested_day);
        if bound {
            soul.bind(minion_id)?;
        }
        souls.push(soul);
    }
    state.souls = SoulVault::from_parts(souls, souls_next_id);

    let minions_next_id = r.u32()?;
    let minion_count = usize::from(r.u16()?);
    let mut minions = Vec::with_capacity(minion_count);
    for _ in 0..minion_count {
        let id = r.u32()?;
        let kind = minion_kind_from(r.u8()?)?;
        let name = r.string()?;
        let level = r.u32()?;
        let experience = r.u32()?;
        let location = r.u32()?;
        let bound = r.bool()?;
        let soul_id = r.u32()?;
        let mut stats = kind.base_stats();
        stats.hp = r.u32()?;
        stats.hp_max = r.u32()?;
        stats.attack = r.u32()?;
        stats.defense = r.u32()?;
        stats.speed = r.u32()?;
        stats.loyalty = r.u8()?;
        minions.push(Minion {
            id,
            name,
            kind,
            stats,
            level,
            experience,
            location,
            bound_soul: bound.then_some(soul_id),
        });
    }
    state.minions = MinionRoster::from_parts(minions, minions_next_id);

    let mut records = [TrialRecord::default(); TRIAL_COUNT];
    for record in &mut records {
        record.status = trial_status_from(r.u8()?)?;
        record.attempts = r.u8()?;
        record.best_score = r.f32()?;
        record.passed_first_try = r.bool()?;
    }
    state.trials = TrialSet::from_records(records);

    state.judgment = if r.bool()? {
        let mut votes = [GodVote::Abstain; 7];
        for vote in &mut votes {
            *vote = vote_from(r.u8()?)?;
        }
        Some(JudgmentVerdict::from_votes(votes))
    } else {
        None
    };

    Ok(state)
}

// ---- file format -----------------------------------------------------------

fn encode_file(state: &PlayerState) -> GameResult<Vec<u8>> {
    let data = encode_state(state)?;
    let mut out = Vec::with_capacity(HEADER_LEN + data.len());
    put_u32(&mut out, MAGIC);
    put_u8(&mut out, VERSION_MAJOR);
    put_u8(&mut out, VERSION_MINOR);
    put_u8(&mut out, VERSION_PATCH);
    put_u8(&mut out, 0); // reserved
    put_u32(&mut out, crc32(&data));
    out.extend_from_slice(&(data.len() as u64).to_le_bytes());
    out.extend_from_slice(&data);
    Ok(out)
}

fn decode_file(bytes: &[u8]) -> GameResult<PlayerState> {
    let mut r = Reader::new(bytes);
    if bytes.len() < HEADER_LEN {
        return Err(GameError::TruncatedSave);
    }
    let magic = r.u32()?;
    if magic != MAGIC {
        return Err(GameError::BadMagic(magic));
    }
    let major = r.u8()?;
    let _minor = r.u8()?;
    let _patch = r.u8()?;
    let _reserved = r.u8()?;
    if major != VERSION_MAJOR {
        return Err(GameError::VersionMismatch {
            found: major,
            expected: VERSION_MAJOR,
        });
    }
    let crc = r.u32()?;
    let mut len_buf = [0_u8; 8];
    len_buf.copy_from_slice(r.take(8)?);
    let data_len = usize::try_from(u64::from_le_bytes(len_buf))
        .map_err(|_| GameError::InvalidSaveData("data length overflow".to_string()))?;
    let data = r.take(data_len)?;
    if crc32(data) != crc {
        return Err(GameError::ChecksumMismatch);
    }
    decode_state(data)
}

/// Write the run to `path`. Refused while an encounter is running; the
/// active encounter is never part of the file.
pub fn save_game(state: &PlayerState, path: &Path) -> GameResult<()> {
    if state.in_combat() {
        return Err(GameError::AlreadyInCombat);
    }
    let bytes = encode_file(state)?;
    fs::write(path, &bytes)?;
    log::debug!("saved {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Load a run from `path`.
pub fn load_game(path: &Path) -> GameResult<PlayerState> {
    let bytes = fs::read(path)?;
    log::debug!("read {} bytes from {}", bytes.len(), path.display());
    decode_file(&bytes)
}
