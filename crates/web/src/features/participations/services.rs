use std::collections::HashMap;

use storage::{
    dto::participation::{
        CreateParticipationRequest, ParticipationWithMatch, ParticipationWithPlayer,
        UpdateParticipationRequest,
    },
    error::{Result, StorageError},
    models::{Match, MatchParticipation},
    repository::{
        matches::MatchRepository, participation::ParticipationRepository,
        player::PlayerRepository,
    },
    store::DocumentStore,
};

/// Record (or re-record) a player's participation in a match
pub async fn record_participation(
    store: &dyn DocumentStore,
    request: &CreateParticipationRequest,
) -> Result<MatchParticipation> {
    if !MatchRepository::new(store).exists(&request.match_id).await? {
        return Err(StorageError::validation(format!(
            "Match {} not found",
            request.match_id
        )));
    }
    if !PlayerRepository::new(store).exists(&request.player_id).await? {
        return Err(StorageError::validation(format!(
            "Player {} not found",
            request.player_id
        )));
    }

    ParticipationRepository::new(store).upsert(request).await
}

/// Participations in a match with their players; deleted players are
/// left out.
pub async fn list_match_participations(
    store: &dyn DocumentStore,
    match_id: &str,
) -> Result<Vec<ParticipationWithPlayer>> {
    let participations = ParticipationRepository::new(store)
        .list_for_match(match_id)
        .await?;

    let players: HashMap<String, _> = PlayerRepository::new(store)
        .list()
        .await?
        .into_iter()
        .map(|player| (player.id.clone(), player))
        .collect();

    Ok(participations
        .into_iter()
        .filter_map(|participation| {
            let player = players.get(&participation.player_id)?.clone();
            Some(ParticipationWithPlayer {
                participation,
                player,
            })
        })
        .collect())
}

/// A player's participations, each paired with its match when the match
/// still exists.
pub async fn player_participations(
    store: &dyn DocumentStore,
    player_id: &str,
) -> Result<Vec<(MatchParticipation, Option<Match>)>> {
    let participations = ParticipationRepository::new(store)
        .list_for_player(player_id)
        .await?;

    let match_ids: Vec<String> = participations.iter().map(|p| p.match_id.clone()).collect();
    let matches: HashMap<String, Match> = MatchRepository::new(store)
        .list_by_ids(&match_ids)
        .await?
        .into_iter()
        .map(|game| (game.id.clone(), game))
        .collect();

    Ok(participations
        .into_iter()
        .map(|participation| {
            let game = matches.get(&participation.match_id).cloned();
            (participation, game)
        })
        .collect())
}

/// A player's participations with their matches; orphans are left out.
pub async fn list_player_participations(
    store: &dyn DocumentStore,
    player_id: &str,
) -> Result<Vec<ParticipationWithMatch>> {
    Ok(player_participations(store, player_id)
        .await?
        .into_iter()
        .filter_map(|(participation, game)| {
            Some(ParticipationWithMatch {
                participation,
                match_: game?,
            })
        })
        .collect())
}

pub async fn update_participation(
    store: &dyn DocumentStore,
    id: &str,
    request: &UpdateParticipationRequest,
) -> Result<MatchParticipation> {
    ParticipationRepository::new(store).update(id, request).await
}

pub async fn delete_participation(store: &dyn DocumentStore, id: &str) -> Result<()> {
    ParticipationRepository::new(store).delete(id).await
}
