use log::info;

use crate::{
    app::{
        ArcChatMessageRepository, ArcLeagueRepository, ArcPlayerRepository, ArcTeamRepository,
        ArcUserRepository,
    },
    league::DEFAULT_SALARY_CAP,
    persistence::{
        chat::ChatMessageRepository,
        leagues::{LeagueRepository, NewLeague},
        players::{NewPlayer, PlayerRepository},
        teams::{NewTeam, TeamRepository},
        users::{NewUser, UserRepository},
    },
    player::{Position, Ratings},
    team::Tier,
    user::UserRole,
};

/// Installs the sample league so a fresh server is immediately usable:
/// one commissioner, one GM, four pro teams, a full Bears roster and a
/// little chat history. Both seeded accounts log in with "password".
pub fn install_fixtures(
    users: &ArcUserRepository,
    leagues: &ArcLeagueRepository,
    teams: &ArcTeamRepository,
    players: &ArcPlayerRepository,
    chat: &ArcChatMessageRepository,
) {
    let password_hash = bcrypt::hash("password", bcrypt::DEFAULT_COST)
        .expect("Failed to hash seed password");

    let commissioner = users.create_user(NewUser {
        username: "commissioner".to_string(),
        password_hash: password_hash.clone(),
        role: UserRole::Commissioner,
        email: "commissioner@example.com".to_string(),
    });
    let gm = users.create_user(NewUser {
        username: "gm_john".to_string(),
        password_hash,
        role: UserRole::Gm,
        email: "john@example.com".to_string(),
    });

    let league = leagues.create_league(NewLeague {
        name: "Elite Hockey League".to_string(),
        commissioner_id: commissioner.id,
        current_season: 1,
        current_day: 32,
        salary_cap: DEFAULT_SALARY_CAP,
        is_active: true,
    });

    let team_rows: [(&str, &str, Option<i64>, i32, i32, i32, i32, i32); 4] = [
        ("Boston", "Bears", Some(gm.id), 18, 12, 2, 104, 89),
        ("Montreal", "Hawks", None, 17, 13, 2, 98, 92),
        ("Toronto", "Eagles", None, 16, 12, 3, 94, 88),
        ("Chicago", "Storm", None, 15, 14, 3, 91, 95),
    ];
    let mut bears_id = None;
    for (city, name, gm_id, wins, losses, overtime_losses, goals_for, goals_against) in team_rows {
        let team = teams.create_team(NewTeam {
            league_id: league.id,
            city: city.to_string(),
            name: name.to_string(),
            gm_id,
            tier: Tier::Pro,
            wins,
            losses,
            overtime_losses,
            goals_for,
            goals_against,
            budget: DEFAULT_SALARY_CAP,
        });
        bears_id.get_or_insert(team.id);
    }
    let bears_id = bears_id.expect("Seed created no teams");

    #[allow(clippy::too_many_arguments)]
    fn bears_player(
        league_id: i64,
        team_id: i64,
        first_name: &str,
        last_name: &str,
        position: Position,
        age: i32,
        jersey_number: i32,
        nationality: &str,
        ratings: [i32; 6],
        salary: f64,
        contract_length: i32,
        stats: [i32; 3],
    ) -> NewPlayer {
        let [overall, skating, shooting, hands, checking, defense] = ratings;
        let [goals, assists, points] = stats;
        NewPlayer {
            league_id,
            team_id: Some(team_id),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            position,
            age,
            jersey_number: Some(jersey_number),
            nationality: nationality.to_string(),
            ratings: Ratings {
                overall,
                skating,
                shooting,
                hands,
                checking,
                defense,
            },
            salary,
            contract_length,
            goals,
            assists,
            points,
        }
    }

    let roster = [
        bears_player(league.id, bears_id, "Connor", "McDavid", Position::C, 26, 91, "Canada", [96, 95, 93, 95, 75, 80], 12_500_000.0, 8, [28, 42, 70]),
        bears_player(league.id, bears_id, "Leon", "Draisaitl", Position::LW, 27, 29, "Germany", [93, 88, 95, 92, 82, 78], 8_500_000.0, 6, [24, 38, 62]),
        bears_player(league.id, bears_id, "Kailer", "Yamamoto", Position::RW, 24, 56, "USA", [84, 90, 82, 87, 70, 72], 3_100_000.0, 3, [15, 22, 37]),
        bears_player(league.id, bears_id, "Ryan", "Nugent-Hopkins", Position::C, 29, 93, "Canada", [85, 86, 84, 88, 75, 85], 5_125_000.0, 5, [12, 28, 40]),
        bears_player(league.id, bears_id, "Darnell", "Nurse", Position::D, 28, 25, "Canada", [87, 85, 75, 78, 89, 90], 9_250_000.0, 7, [8, 24, 32]),
        bears_player(league.id, bears_id, "Stuart", "Skinner", Position::G, 24, 74, "Canada", [82, 85, 60, 88, 70, 95], 2_600_000.0, 3, [0, 2, 2]),
    ];
    for new_player in roster {
        players.create_player(new_player);
    }

    chat.create_message(
        league.id,
        commissioner.id,
        "Great game last night! That overtime was intense.",
    );
    chat.create_message(
        league.id,
        gm.id,
        "Anyone interested in trading for a defenseman?",
    );

    info!(
        "Seeded league {} ({}) with {} teams",
        league.id,
        league.name,
        team_rows.len()
    );
}
