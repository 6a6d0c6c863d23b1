use cosmwasm_schema::cw_serde;

pub const DEFAULT_SURROUNDING_TICKS: usize = 300;

#[cw_serde]
#[serde(default)]
pub struct EngineConfig {
    // ticks walked on each side of the active tick
    pub num_surrounding_ticks: usize,
    // compute bucket reserves on the rayon pool, ignored without the `parallel` feature
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            num_surrounding_ticks: DEFAULT_SURROUNDING_TICKS,
            parallel: true,
        }
    }
}
