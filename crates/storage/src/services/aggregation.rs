//! Pure aggregations over normalized records.
//!
//! Nothing here touches the store. Callers pass in the records and the
//! current time; every function is deterministic in its inputs.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::dto::attendance::{AttendanceStatistics, RecentAttendance, StatusCounts};
use crate::dto::common::DateRange;
use crate::dto::participation::ParticipationWithMatch;
use crate::dto::report::{
    Breakdown, CalendarEntry, MatchStats, MonthlyCount, PlayerActivity, TeamBreakdown,
};
use crate::models::{Attendance, CollectiveSession, Match, MatchParticipation, Player, Session, Team};

pub const RECENT_SESSIONS: usize = 10;
pub const RECENT_ATTENDANCES: usize = 10;
pub const RECENT_MATCHES: usize = 5;
pub const LEAST_ACTIVE_PLAYERS: usize = 5;
pub const INACTIVITY_WINDOW_DAYS: i64 = 5;
pub const EVOLUTION_MONTHS: u32 = 12;
/// Dashboard windows at least this long cover every session.
pub const ALL_TIME_WINDOW_DAYS: u32 = 365;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// `part / total * 100`, one decimal, 0 when `total` is 0.
pub fn rate(part: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(part as f64 / total as f64 * 100.0, 1)
}

/// Mean to one decimal, 0 for no values.
fn mean_one_decimal(values: &[u32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: u64 = values.iter().map(|v| u64::from(*v)).sum();
    round_to(sum as f64 / values.len() as f64, 1)
}

/// Number of records carrying each label. A label repeated within one
/// record counts once; blank labels are skipped.
pub fn label_breakdown<'a, I, L>(labels_per_record: I) -> Breakdown
where
    I: IntoIterator<Item = L>,
    L: IntoIterator<Item = &'a str>,
{
    let mut breakdown = Breakdown::new();
    for labels in labels_per_record {
        let distinct: BTreeSet<&str> = labels
            .into_iter()
            .filter(|label| !label.trim().is_empty())
            .collect();
        for label in distinct {
            *breakdown.entry(label.to_string()).or_insert(0) += 1;
        }
    }
    breakdown
}

pub fn theme_breakdown(sessions: &[Session]) -> Breakdown {
    label_breakdown(
        sessions
            .iter()
            .map(|s| s.themes.iter().map(String::as_str)),
    )
}

pub fn trainer_breakdown(sessions: &[Session]) -> Breakdown {
    label_breakdown(
        sessions
            .iter()
            .map(|s| s.trainers.iter().map(String::as_str)),
    )
}

/// Player display name to session count. Ids missing from `names` are
/// counted under `unknown`.
pub fn player_breakdown(
    sessions: &[Session],
    names: &HashMap<String, String>,
    unknown: &str,
) -> Breakdown {
    label_breakdown(sessions.iter().map(|s| {
        s.player_ids
            .iter()
            .map(|id| names.get(id).map(String::as_str).unwrap_or(unknown))
    }))
}

/// Player id to "First Last".
pub fn player_names(players: &[Player]) -> HashMap<String, String> {
    players
        .iter()
        .map(|p| (p.id.clone(), p.display_name()))
        .collect()
}

/// One calendar entry per session, titled "<player names> - <themes>".
/// Ids missing from `names` show as `unknown`.
pub fn calendar_entries(
    sessions: &[Session],
    names: &HashMap<String, String>,
    unknown: &str,
) -> Vec<CalendarEntry> {
    sessions
        .iter()
        .map(|session| {
            let player_names: Vec<String> = session
                .player_ids
                .iter()
                .map(|id| names.get(id).cloned().unwrap_or_else(|| unknown.to_string()))
                .collect();

            CalendarEntry {
                id: session.id.clone(),
                title: format!("{} - {}", player_names.join(", "), session.themes.join(", ")),
                date: session.session_date.clone(),
                player_names,
                themes: session.themes.clone(),
                trainers: session.trainers.clone(),
                content_details: session.content_details.clone(),
            }
        })
        .collect()
}

/// Sessions admitted by `range`. Unparseable dates only pass an open range.
pub fn filter_by_range(sessions: Vec<Session>, range: &DateRange) -> Vec<Session> {
    sessions
        .into_iter()
        .filter(|s| range.admits(s.date()))
        .collect()
}

/// Whether a session held at `at` falls in `[now - days, now]`.
fn within_days(at: Option<NaiveDateTime>, now: NaiveDateTime, days: i64) -> bool {
    let Some(at) = at else {
        return false;
    };
    at >= now - Duration::days(days) && at <= now
}

/// Sessions from the trailing `days` days. Windows of
/// [`ALL_TIME_WINDOW_DAYS`] or more keep everything, unparseable dates
/// included.
pub fn within_window(sessions: &[Session], now: NaiveDateTime, days: u32) -> Vec<Session> {
    if days >= ALL_TIME_WINDOW_DAYS {
        return sessions.to_vec();
    }

    sessions
        .iter()
        .filter(|s| within_days(s.datetime(), now, i64::from(days)))
        .cloned()
        .collect()
}

/// The `limit` latest sessions, newest first. Unparseable dates sort last.
pub fn recent_sessions(sessions: &[Session], limit: usize) -> Vec<Session> {
    let mut sorted = sessions.to_vec();
    sorted.sort_by(|a, b| b.date().cmp(&a.date()));
    sorted.truncate(limit);
    sorted
}

/// First day of the month `offset` months before the month of `date`.
fn months_back(date: NaiveDate, offset: u32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 - offset as i32;
    NaiveDate::from_ymd_opt(total.div_euclid(12), total.rem_euclid(12) as u32 + 1, 1)
        .unwrap_or(date)
}

/// Session counts for the 12 calendar months ending with the month of
/// `now`, oldest first. Empty months are left out.
pub fn monthly_evolution(sessions: &[Session], now: NaiveDateTime) -> Vec<MonthlyCount> {
    let mut counts: BTreeMap<(i32, u32), u32> = BTreeMap::new();
    let first_month = months_back(now.date(), EVOLUTION_MONTHS - 1);

    for date in sessions.iter().filter_map(Session::date) {
        if date >= first_month && date <= now.date() {
            *counts.entry((date.year(), date.month())).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .map(|((year, month), count)| MonthlyCount {
            month: format!("{}-{:02}", year, month),
            label: format!("{} {}", MONTH_NAMES[month as usize - 1], year),
            count,
        })
        .collect()
}

/// Session count per player, every player listed, fewest sessions first.
/// Ties keep the order of `players`.
pub fn player_activity(players: &[Player], sessions: &[Session]) -> Vec<PlayerActivity> {
    let mut activity: Vec<PlayerActivity> = players
        .iter()
        .map(|player| PlayerActivity {
            player_id: player.id.clone(),
            name: player.display_name(),
            session_count: sessions.iter().filter(|s| s.involves(&player.id)).count() as u32,
        })
        .collect();

    activity.sort_by_key(|a| a.session_count);
    activity
}

/// Names of players with no session in the trailing
/// [`INACTIVITY_WINDOW_DAYS`] days. Pass the unfiltered session set.
pub fn inactive_players(players: &[Player], sessions: &[Session], now: NaiveDateTime) -> Vec<String> {
    let recent: Vec<&Session> = sessions
        .iter()
        .filter(|s| within_days(s.datetime(), now, INACTIVITY_WINDOW_DAYS))
        .collect();

    players
        .iter()
        .filter(|player| !recent.iter().any(|s| s.involves(&player.id)))
        .map(Player::display_name)
        .collect()
}

/// Statistics over a player's attendances joined to their collective
/// sessions.
pub fn attendance_statistics(records: &[(Attendance, CollectiveSession)]) -> AttendanceStatistics {
    let mut overall = StatusCounts::default();
    let mut by_type: BTreeMap<String, StatusCounts> = BTreeMap::new();

    for (attendance, session) in records {
        overall.record(attendance.status);
        by_type
            .entry(session.session_type.clone())
            .or_default()
            .record(attendance.status);
    }

    let mut sorted: Vec<&(Attendance, CollectiveSession)> = records.iter().collect();
    sorted.sort_by(|(_, a), (_, b)| b.date().cmp(&a.date()));

    let recent_attendances = sorted
        .into_iter()
        .take(RECENT_ATTENDANCES)
        .map(|(attendance, session)| RecentAttendance {
            session_date: session.session_date.clone(),
            session_type: session.session_type.clone(),
            status: attendance.status,
            notes: attendance.notes.clone(),
        })
        .collect();

    AttendanceStatistics {
        total_sessions: overall.total,
        present: overall.present,
        absent: overall.absent,
        injured: overall.injured,
        off: overall.off,
        presence_rate: rate(overall.present, overall.total),
        absence_rate: rate(overall.absent, overall.total),
        injury_rate: rate(overall.injured, overall.total),
        by_type,
        recent_attendances,
    }
}

/// Match statistics over a player's full participation history. Each
/// participation comes with its match when the match still exists.
pub fn match_statistics(records: &[(MatchParticipation, Option<Match>)]) -> MatchStats {
    let mut stats = MatchStats {
        total_matches: records.len() as u32,
        ..MatchStats::default()
    };

    let mut played_times = Vec::new();
    let mut team_times: BTreeMap<Team, Vec<u32>> = BTreeMap::new();
    let mut with_match = Vec::new();

    for (participation, game) in records {
        if participation.is_present {
            stats.matches_played += 1;
            if participation.is_starter {
                stats.matches_started += 1;
            }
        }

        let counted = participation.counted_play_time();
        if let Some(minutes) = counted {
            played_times.push(minutes);
        }

        let Some(game) = game else {
            continue;
        };

        let team = stats
            .team_breakdown
            .entry(game.team.as_str().to_string())
            .or_insert_with(TeamBreakdown::default);
        team.total += 1;
        if participation.is_present {
            team.played += 1;
            if participation.is_starter {
                team.started += 1;
            }
        }

        if let Some(minutes) = counted {
            team_times.entry(game.team).or_default().push(minutes);
        }

        with_match.push(ParticipationWithMatch {
            participation: participation.clone(),
            match_: game.clone(),
        });
    }

    stats.total_play_time = played_times.iter().sum();
    stats.average_play_time = mean_one_decimal(&played_times);
    stats.average_play_time_u18 =
        mean_one_decimal(team_times.get(&Team::U18).map(Vec::as_slice).unwrap_or_default());
    stats.average_play_time_u21 =
        mean_one_decimal(team_times.get(&Team::U21).map(Vec::as_slice).unwrap_or_default());

    with_match.sort_by(|a, b| b.match_.match_date.cmp(&a.match_.match_date));
    with_match.truncate(RECENT_MATCHES);
    stats.recent_matches = with_match;

    stats
}
