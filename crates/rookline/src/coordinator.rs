//! The game coordinator: applies client commands to stored games and
//! fans the results out to everyone in the room.
//!
//! Every command follows the same shape:
//!
//! ```text
//! resolve token → fetch record → authorize → mutate local copy
//!     → write record back → broadcast through the registry
//! ```
//!
//! The coordinator holds no game state between commands. Two connections
//! moving in the same game at the same instant both fetch, both write,
//! and the later write wins; the store has no version token to stop it.
//!
//! Rejections never reach the room. They go back to the connection that
//! sent the command, as a single `ERROR` message, and nothing is written.

use rookline_protocol::{ClientCommand, CommandType, GameId, GameRecord, ServerMessage, Username};
use rookline_rules::{Color, GameStatus, Move};
use rookline_session::{IdentityProvider, OutboundSender, SessionRegistry};
use rookline_store::GameStore;

use crate::{CommandError, ErrorKind};

/// Applies [`ClientCommand`]s on behalf of every connection.
///
/// One coordinator is shared (behind an `Arc`) by all connection tasks.
/// Its only mutable state is the [`SessionRegistry`], which is
/// concurrency-safe on its own.
pub struct GameCoordinator<S: GameStore, I: IdentityProvider> {
    store: S,
    identity: I,
    registry: SessionRegistry,
}

impl<S: GameStore, I: IdentityProvider> GameCoordinator<S, I> {
    pub fn new(store: S, identity: I) -> Self {
        Self {
            store,
            identity,
            registry: SessionRegistry::new(),
        }
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Runs `command` and reports any rejection to `origin` as an
    /// `ERROR` message.
    pub async fn handle(&self, command: ClientCommand, origin: &OutboundSender) {
        let command_type = command.command_type;
        let game_id = command.game_id;

        if let Err(err) = self.execute(command, origin).await {
            match err.kind() {
                ErrorKind::StoreFailure => {
                    tracing::warn!(?command_type, %game_id, error = ?err, "store failure");
                }
                _ => {
                    tracing::debug!(?command_type, %game_id, error = %err, "command rejected");
                }
            }
            // The sender may have hung up already; nothing left to tell.
            let _ = origin.send(ServerMessage::error(&err));
        }
    }

    /// Runs `command`, returning the rejection instead of sending it.
    ///
    /// `origin` is the channel of the connection that sent the command.
    /// CONNECT registers it in the room; the other commands only use it
    /// for direct replies.
    pub async fn execute(
        &self,
        command: ClientCommand,
        origin: &OutboundSender,
    ) -> Result<(), CommandError> {
        let username = self.identity.resolve(&command.auth_token).await?;

        match command.command_type {
            CommandType::Connect => self.connect(username, command.game_id, origin).await,
            CommandType::MakeMove => {
                let wire = command.chess_move.ok_or_else(|| {
                    CommandError::Validation("MAKE_MOVE requires a move".into())
                })?;
                let mv = wire.to_move()?;
                self.make_move(username, command.game_id, mv).await
            }
            CommandType::Leave => self.leave(username, command.game_id).await,
            CommandType::Resign => self.resign(username, command.game_id).await,
        }
    }

    // -----------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------

    async fn connect(
        &self,
        username: Username,
        game_id: GameId,
        origin: &OutboundSender,
    ) -> Result<(), CommandError> {
        let record = self.fetch(game_id).await?;
        let role = match record.seat_of(&username) {
            Some(Color::White) => "white",
            Some(Color::Black) => "black",
            None => "an observer",
        };

        self.registry.add(username.clone(), game_id, origin.clone());
        // A joiner that already hung up is pruned here; the room notice
        // below still goes out.
        self.registry
            .send_to(&username, ServerMessage::load_game(record));

        tracing::info!(%game_id, %username, role, "player connected");
        self.registry.broadcast(
            Some(&username),
            &ServerMessage::notification(format!(
                "User {username} connected to game {game_id} as {role}"
            )),
            game_id,
        );
        Ok(())
    }

    async fn make_move(
        &self,
        username: Username,
        game_id: GameId,
        mv: Move,
    ) -> Result<(), CommandError> {
        let mut record = self.fetch(game_id).await?;
        if record.game.is_over() {
            return Err(CommandError::GameOver);
        }

        let turn = record.game.turn();
        if record.player(turn) != Some(&username) {
            return Err(match record.seat_of(&username) {
                Some(_) => CommandError::WrongTurn,
                None => CommandError::Unauthorized(
                    "you are not a player in this game".into(),
                ),
            });
        }

        record.game.make_move(mv)?;

        let next = record.game.turn();
        let status = record.game.status(next);
        if status.is_terminal() {
            record.game.finish();
        }
        self.store.update_game(record.clone()).await?;

        tracing::info!(%game_id, %username, %mv, ?status, "move played");
        self.registry
            .broadcast(None, &ServerMessage::load_game(record), game_id);

        let mut message = format!("User {username} made move {mv} in game {game_id}.");
        match status {
            GameStatus::Ongoing => {}
            GameStatus::Check => message.push_str(&format!(" Check! {next}'s turn.")),
            GameStatus::Checkmate => {
                message.push_str(&format!(" Checkmate! {username} wins the game!"));
            }
            GameStatus::Stalemate => message.push_str(" Stalemate! The game is a draw."),
        }
        self.registry.broadcast(
            Some(&username),
            &ServerMessage::notification(message),
            game_id,
        );
        Ok(())
    }

    async fn leave(&self, username: Username, game_id: GameId) -> Result<(), CommandError> {
        // A game that no longer exists has no seat to clear.
        let mut seated = false;
        if let Some(mut record) = self.store.get_game(game_id).await? {
            while let Some(color) = record.seat_of(&username) {
                record.clear_seat(color);
                seated = true;
            }
            if seated {
                self.store.update_game(record).await?;
            }
        }

        // Unregister only after the seat change is stored.
        self.registry.remove(&username);

        tracing::info!(%game_id, %username, seated, "player left");
        self.registry.broadcast(
            Some(&username),
            &ServerMessage::notification(format!("User {username} left game {game_id}")),
            game_id,
        );
        Ok(())
    }

    async fn resign(&self, username: Username, game_id: GameId) -> Result<(), CommandError> {
        let mut record = self.fetch(game_id).await?;
        if record.seat_of(&username).is_none() {
            return Err(CommandError::Unauthorized(
                "only players can resign".into(),
            ));
        }
        if record.game.is_over() {
            return Err(CommandError::GameOver);
        }

        record.game.finish();
        self.store.update_game(record).await?;

        tracing::info!(%game_id, %username, "player resigned");
        self.registry.broadcast(
            None,
            &ServerMessage::notification(format!(
                "User {username} has resigned from game {game_id}"
            )),
            game_id,
        );
        Ok(())
    }

    async fn fetch(&self, game_id: GameId) -> Result<GameRecord, CommandError> {
        self.store
            .get_game(game_id)
            .await?
            .ok_or(CommandError::GameNotFound(game_id))
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Coordinator tests run against the in-memory store and identity
    //! provider, with plain mpsc channels standing in for sockets.

    use std::sync::Arc;

    use rookline_protocol::WireMove;
    use rookline_rules::{PieceType, Position};
    use rookline_session::MemoryIdentityProvider;
    use rookline_store::{MemoryGameStore, StoreError};
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    use super::*;

    // -- Helpers ----------------------------------------------------------

    type Coordinator = GameCoordinator<Arc<MemoryGameStore>, Arc<MemoryIdentityProvider>>;

    /// A client: its token and the receiving end of its channel.
    struct Client {
        token: String,
        tx: OutboundSender,
        rx: UnboundedReceiver<ServerMessage>,
    }

    impl Client {
        fn drain(&mut self) -> Vec<ServerMessage> {
            let mut out = Vec::new();
            while let Ok(msg) = self.rx.try_recv() {
                out.push(msg);
            }
            out
        }
    }

    struct Fixture {
        coordinator: Coordinator,
        store: Arc<MemoryGameStore>,
        game_id: GameId,
        white: Client,
        black: Client,
        observer: Client,
    }

    async fn client(identity: &MemoryIdentityProvider, name: &str) -> Client {
        let token = identity.issue(Username::new(name)).await;
        let (tx, rx) = mpsc::unbounded_channel();
        Client { token, tx, rx }
    }

    /// Game with alice as White, bob as Black, and carol watching.
    async fn fixture() -> Fixture {
        let store = Arc::new(MemoryGameStore::new());
        let identity = Arc::new(MemoryIdentityProvider::new());
        let game_id = store.create_game("test").await;
        store
            .join_game(game_id, Color::White, Username::new("alice"))
            .await
            .unwrap();
        store
            .join_game(game_id, Color::Black, Username::new("bob"))
            .await
            .unwrap();

        let white = client(&identity, "alice").await;
        let black = client(&identity, "bob").await;
        let observer = client(&identity, "carol").await;

        Fixture {
            coordinator: GameCoordinator::new(Arc::clone(&store), identity),
            store,
            game_id,
            white,
            black,
            observer,
        }
    }

    /// Fixture where all three clients have connected and their join
    /// messages have been drained.
    async fn connected_fixture() -> Fixture {
        let mut f = fixture().await;
        for c in [&f.white, &f.black, &f.observer] {
            f.coordinator
                .execute(ClientCommand::connect(&c.token, f.game_id), &c.tx)
                .await
                .unwrap();
        }
        f.white.drain();
        f.black.drain();
        f.observer.drain();
        f
    }

    fn mv(from: (u8, u8), to: (u8, u8)) -> Move {
        Move::new(Position::new(from.0, from.1), Position::new(to.0, to.1))
    }

    async fn play(f: &Fixture, c: &Client, m: Move) -> Result<(), CommandError> {
        f.coordinator
            .execute(ClientCommand::make_move(&c.token, f.game_id, m), &c.tx)
            .await
    }

    fn notifications(msgs: &[ServerMessage]) -> Vec<&str> {
        msgs.iter()
            .filter_map(|m| match m {
                ServerMessage::Notification { message } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    fn load_games(msgs: &[ServerMessage]) -> Vec<&GameRecord> {
        msgs.iter()
            .filter_map(|m| match m {
                ServerMessage::LoadGame { game } => Some(game),
                _ => None,
            })
            .collect()
    }

    // =====================================================================
    // CONNECT
    // =====================================================================

    #[tokio::test]
    async fn test_connect_sends_load_game_to_joiner_only() {
        let mut f = fixture().await;
        f.coordinator
            .execute(ClientCommand::connect(&f.white.token, f.game_id), &f.white.tx)
            .await
            .unwrap();

        let msgs = f.white.drain();
        assert_eq!(load_games(&msgs).len(), 1);
        assert!(notifications(&msgs).is_empty(), "joiner is not told about itself");
    }

    #[tokio::test]
    async fn test_connect_notifies_room_with_role() {
        let mut f = fixture().await;
        f.coordinator
            .execute(ClientCommand::connect(&f.white.token, f.game_id), &f.white.tx)
            .await
            .unwrap();
        f.coordinator
            .execute(ClientCommand::connect(&f.observer.token, f.game_id), &f.observer.tx)
            .await
            .unwrap();

        let msgs = f.white.drain();
        assert_eq!(
            notifications(&msgs),
            [format!("User carol connected to game {} as an observer", f.game_id)]
        );
    }

    #[tokio::test]
    async fn test_connect_with_closed_channel_prunes_joiner() {
        let mut f = fixture().await;
        f.coordinator
            .execute(ClientCommand::connect(&f.black.token, f.game_id), &f.black.tx)
            .await
            .unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        f.coordinator
            .execute(ClientCommand::connect(&f.white.token, f.game_id), &tx)
            .await
            .unwrap();

        assert_eq!(
            f.coordinator.registry().room_members(f.game_id),
            vec![Username::new("bob")]
        );
        assert_eq!(notifications(&f.black.drain()).len(), 1);
    }

    #[tokio::test]
    async fn test_connect_unknown_game_is_validation_error() {
        let f = fixture().await;
        let err = f
            .coordinator
            .execute(ClientCommand::connect(&f.white.token, GameId(999)), &f.white.tx)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(f.coordinator.registry().is_empty());
    }

    #[tokio::test]
    async fn test_connect_bad_token_is_authorization_error() {
        let f = fixture().await;
        let err = f
            .coordinator
            .execute(ClientCommand::connect("bogus", f.game_id), &f.white.tx)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
    }

    // =====================================================================
    // MAKE_MOVE
    // =====================================================================

    #[tokio::test]
    async fn test_make_move_broadcasts_load_game_and_skips_mover_notification() {
        let mut f = connected_fixture().await;
        play(&f, &f.white, mv((2, 5), (4, 5))).await.unwrap();

        let white = f.white.drain();
        let black = f.black.drain();
        let observer = f.observer.drain();

        assert_eq!(load_games(&white).len(), 1);
        assert!(notifications(&white).is_empty());

        assert_eq!(load_games(&black).len(), 1);
        assert_eq!(
            notifications(&black),
            [format!("User alice made move e2e4 in game {}.", f.game_id)]
        );
        assert_eq!(load_games(&observer).len(), 1);
        assert_eq!(notifications(&observer).len(), 1);
    }

    #[tokio::test]
    async fn test_make_move_persists_new_turn() {
        let f = connected_fixture().await;
        play(&f, &f.white, mv((2, 5), (4, 5))).await.unwrap();

        let record = f.store.get_game(f.game_id).await.unwrap().unwrap();
        assert_eq!(record.game.turn(), Color::Black);
    }

    #[tokio::test]
    async fn test_make_move_out_of_turn_is_authorization_error() {
        let mut f = connected_fixture().await;
        let err = play(&f, &f.black, mv((7, 5), (5, 5))).await.unwrap_err();

        assert!(matches!(err, CommandError::WrongTurn));
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert!(f.white.drain().is_empty(), "nothing broadcast on rejection");
    }

    #[tokio::test]
    async fn test_make_move_by_observer_is_authorization_error() {
        let f = connected_fixture().await;
        let err = play(&f, &f.observer, mv((2, 5), (4, 5))).await.unwrap_err();
        assert!(matches!(err, CommandError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_make_move_illegal_is_rule_violation() {
        let f = connected_fixture().await;
        let err = play(&f, &f.white, mv((2, 5), (5, 5))).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RuleViolation);
        let record = f.store.get_game(f.game_id).await.unwrap().unwrap();
        assert_eq!(record.game.turn(), Color::White);
    }

    #[tokio::test]
    async fn test_make_move_moving_opponent_piece_is_wrong_turn() {
        let f = connected_fixture().await;
        let err = play(&f, &f.white, mv((7, 5), (5, 5))).await.unwrap_err();
        assert!(matches!(err, CommandError::WrongTurn));
    }

    #[tokio::test]
    async fn test_make_move_without_move_is_validation_error() {
        let f = connected_fixture().await;
        let mut command = ClientCommand::make_move(&f.white.token, f.game_id, mv((2, 5), (4, 5)));
        command.chess_move = None;

        let err = f.coordinator.execute(command, &f.white.tx).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_make_move_off_board_is_validation_error() {
        let f = connected_fixture().await;
        let mut command = ClientCommand::make_move(&f.white.token, f.game_id, mv((2, 5), (4, 5)));
        command.chess_move = Some(WireMove {
            start_row: 2,
            start_col: 5,
            end_row: 9,
            end_col: 5,
            promotion: None,
        });

        let err = f.coordinator.execute(command, &f.white.tx).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_fools_mate_finishes_game_and_announces_winner() {
        let mut f = connected_fixture().await;
        play(&f, &f.white, mv((2, 6), (3, 6))).await.unwrap();
        play(&f, &f.black, mv((7, 5), (5, 5))).await.unwrap();
        play(&f, &f.white, mv((2, 7), (4, 7))).await.unwrap();
        f.white.drain();
        play(&f, &f.black, mv((8, 4), (4, 8))).await.unwrap();

        let record = f.store.get_game(f.game_id).await.unwrap().unwrap();
        assert!(record.game.is_over());

        let white = f.white.drain();
        assert_eq!(
            notifications(&white),
            [format!(
                "User bob made move d8h4 in game {}. Checkmate! bob wins the game!",
                f.game_id
            )]
        );

        let err = play(&f, &f.white, mv((2, 1), (3, 1))).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TerminalState);
    }

    #[tokio::test]
    async fn test_check_is_announced_with_side_to_move() {
        let mut f = connected_fixture().await;
        // 1. e4 f6 2. Qh5+
        play(&f, &f.white, mv((2, 5), (4, 5))).await.unwrap();
        play(&f, &f.black, mv((7, 6), (6, 6))).await.unwrap();
        f.black.drain();
        play(&f, &f.white, mv((1, 4), (5, 8))).await.unwrap();

        let black = f.black.drain();
        let texts = notifications(&black);
        assert_eq!(texts.len(), 1);
        assert!(texts[0].ends_with("Check! Black's turn."), "{}", texts[0]);

        let record = f.store.get_game(f.game_id).await.unwrap().unwrap();
        assert!(!record.game.is_over());
    }

    #[tokio::test]
    async fn test_promotion_move_is_applied() {
        use rookline_rules::{Board, Game, Piece};

        let mut f = connected_fixture().await;
        let mut board = Board::empty();
        board.set_piece(Position::new(1, 5), Some(Piece::new(Color::White, PieceType::King)));
        board.set_piece(Position::new(7, 1), Some(Piece::new(Color::White, PieceType::Pawn)));
        board.set_piece(Position::new(8, 8), Some(Piece::new(Color::Black, PieceType::King)));
        let mut record = f.store.get_game(f.game_id).await.unwrap().unwrap();
        record.game = Game::with_board(board, Color::White);
        f.store.update_game(record).await.unwrap();

        let promote = Move::with_promotion(Position::new(7, 1), Position::new(8, 1), PieceType::Queen);
        play(&f, &f.white, promote).await.unwrap();

        let record = f.store.get_game(f.game_id).await.unwrap().unwrap();
        assert_eq!(
            record.game.board().piece(Position::new(8, 1)),
            Some(Piece::new(Color::White, PieceType::Queen))
        );
        let black = f.black.drain();
        assert!(notifications(&black)[0].contains("a7a8=Q"));
        assert!(notifications(&black)[0].contains("Check!"));
    }

    #[tokio::test]
    async fn test_stalemate_finishes_game_as_draw() {
        use rookline_rules::{Board, Game, Piece};

        let mut f = connected_fixture().await;
        let mut board = Board::empty();
        board.set_piece(Position::new(8, 1), Some(Piece::new(Color::Black, PieceType::King)));
        board.set_piece(Position::new(6, 2), Some(Piece::new(Color::White, PieceType::King)));
        board.set_piece(Position::new(1, 3), Some(Piece::new(Color::White, PieceType::Queen)));
        let mut record = f.store.get_game(f.game_id).await.unwrap().unwrap();
        record.game = Game::with_board(board, Color::White);
        f.store.update_game(record).await.unwrap();

        play(&f, &f.white, mv((1, 3), (7, 3))).await.unwrap();

        let record = f.store.get_game(f.game_id).await.unwrap().unwrap();
        assert!(record.game.is_over());
        let black = f.black.drain();
        assert!(
            notifications(&black)[0].ends_with("Stalemate! The game is a draw."),
            "{:?}",
            notifications(&black)
        );
    }

    // =====================================================================
    // LEAVE
    // =====================================================================

    #[tokio::test]
    async fn test_leave_clears_seat_and_notifies_room() {
        let mut f = connected_fixture().await;
        f.coordinator
            .execute(ClientCommand::leave(&f.white.token, f.game_id), &f.white.tx)
            .await
            .unwrap();

        let record = f.store.get_game(f.game_id).await.unwrap().unwrap();
        assert_eq!(record.white_username, None);
        assert_eq!(record.black_username, Some(Username::new("bob")));
        assert_eq!(record.game.turn(), Color::White, "board and turn untouched");

        assert_eq!(
            notifications(&f.black.drain()),
            [format!("User alice left game {}", f.game_id)]
        );
        assert!(f.white.drain().is_empty());
        assert_eq!(f.coordinator.registry().room_members(f.game_id).len(), 2);
    }

    #[tokio::test]
    async fn test_leave_as_observer_leaves_record_alone() {
        let mut f = connected_fixture().await;
        f.coordinator
            .execute(ClientCommand::leave(&f.observer.token, f.game_id), &f.observer.tx)
            .await
            .unwrap();

        let record = f.store.get_game(f.game_id).await.unwrap().unwrap();
        assert_eq!(record.white_username, Some(Username::new("alice")));
        assert_eq!(notifications(&f.white.drain()).len(), 1);
    }

    #[tokio::test]
    async fn test_leave_after_game_removed_still_unregisters_and_notifies() {
        let mut f = connected_fixture().await;
        f.store.clear().await;

        f.coordinator
            .execute(ClientCommand::leave(&f.white.token, f.game_id), &f.white.tx)
            .await
            .unwrap();

        let members = f.coordinator.registry().room_members(f.game_id);
        assert!(!members.contains(&Username::new("alice")));
        assert_eq!(
            notifications(&f.black.drain()),
            [format!("User alice left game {}", f.game_id)]
        );
        assert!(f.white.drain().is_empty());
    }

    // =====================================================================
    // RESIGN
    // =====================================================================

    #[tokio::test]
    async fn test_resign_by_observer_is_rejected_and_game_continues() {
        let mut f = connected_fixture().await;
        let err = f
            .coordinator
            .execute(ClientCommand::resign(&f.observer.token, f.game_id), &f.observer.tx)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Authorization);
        let record = f.store.get_game(f.game_id).await.unwrap().unwrap();
        assert!(!record.game.is_over());
        assert!(f.white.drain().is_empty());
    }

    #[tokio::test]
    async fn test_resign_finishes_game_and_tells_everyone() {
        let mut f = connected_fixture().await;
        f.coordinator
            .execute(ClientCommand::resign(&f.black.token, f.game_id), &f.black.tx)
            .await
            .unwrap();

        let record = f.store.get_game(f.game_id).await.unwrap().unwrap();
        assert!(record.game.is_over());

        let expected = format!("User bob has resigned from game {}", f.game_id);
        assert_eq!(notifications(&f.black.drain()), [expected.as_str()]);
        assert_eq!(notifications(&f.white.drain()), [expected.as_str()]);
        assert_eq!(notifications(&f.observer.drain()), [expected.as_str()]);
    }

    #[tokio::test]
    async fn test_resign_twice_is_terminal_state_error() {
        let f = connected_fixture().await;
        let resign = || ClientCommand::resign(&f.white.token, f.game_id);
        f.coordinator.execute(resign(), &f.white.tx).await.unwrap();

        let err = f.coordinator.execute(resign(), &f.white.tx).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TerminalState);
    }

    // =====================================================================
    // handle(): error delivery
    // =====================================================================

    #[tokio::test]
    async fn test_handle_sends_prefixed_error_to_origin_only() {
        let mut f = connected_fixture().await;
        f.coordinator
            .handle(
                ClientCommand::make_move(&f.black.token, f.game_id, mv((7, 5), (5, 5))),
                &f.black.tx,
            )
            .await;

        assert_eq!(
            f.black.drain(),
            [ServerMessage::Error {
                error_message: "Error: it is not your turn".into()
            }]
        );
        assert!(f.white.drain().is_empty());
        assert!(f.observer.drain().is_empty());
    }

    /// A store that can't be reached.
    struct DownStore;

    impl GameStore for DownStore {
        async fn get_game(&self, _: GameId) -> Result<Option<GameRecord>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }

        async fn update_game(&self, _: GameRecord) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_handle_store_failure_reports_generic_error() {
        let identity = MemoryIdentityProvider::new();
        let mut alice = client(&identity, "alice").await;
        let coordinator = GameCoordinator::new(DownStore, identity);

        coordinator
            .handle(ClientCommand::connect(&alice.token, GameId(1)), &alice.tx)
            .await;

        let msgs = alice.drain();
        assert_eq!(msgs.len(), 1);
        let ServerMessage::Error { error_message } = &msgs[0] else {
            panic!("expected an error, got {:?}", msgs[0]);
        };
        assert!(error_message.starts_with("Error: storage unavailable"));
        assert!(!error_message.contains("refused"));
        assert!(coordinator.registry().is_empty());
    }

    #[tokio::test]
    async fn test_leave_store_failure_keeps_connection_registered() {
        let identity = MemoryIdentityProvider::new();
        let mut alice = client(&identity, "alice").await;
        let coordinator = GameCoordinator::new(DownStore, identity);
        coordinator
            .registry()
            .add(Username::new("alice"), GameId(1), alice.tx.clone());

        let err = coordinator
            .execute(ClientCommand::leave(&alice.token, GameId(1)), &alice.tx)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::StoreFailure);
        assert_eq!(
            coordinator.registry().room_members(GameId(1)),
            vec![Username::new("alice")]
        );
        assert!(alice.drain().is_empty());
    }
}
