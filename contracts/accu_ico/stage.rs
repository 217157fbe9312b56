/// Sale phases, in the only order the controller may move through them.
///
/// The discriminant doubles as the index into the per-stage arrays held by
/// the controller (allocations, prices, units sold).
#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub enum SaleStage {
    PreSale,
    SeedSale,
    FinalSale,
}

/// Number of sale stages.
pub const STAGE_COUNT: usize = 3;

impl SaleStage {
    pub const ALL: [SaleStage; STAGE_COUNT] =
        [SaleStage::PreSale, SaleStage::SeedSale, SaleStage::FinalSale];

    pub fn index(self) -> usize {
        match self {
            SaleStage::PreSale => 0,
            SaleStage::SeedSale => 1,
            SaleStage::FinalSale => 2,
        }
    }

    /// The stage that follows this one. `None` at FinalSale.
    pub fn next(self) -> Option<SaleStage> {
        match self {
            SaleStage::PreSale => Some(SaleStage::SeedSale),
            SaleStage::SeedSale => Some(SaleStage::FinalSale),
            SaleStage::FinalSale => None,
        }
    }
}
