/// Round lifecycle. `AwaitingStart` is only seen before the first round;
/// `GameOver` is re-entered at the end of every round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    AwaitingStart,
    Playing,
    GameOver,
}
