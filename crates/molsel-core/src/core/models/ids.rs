use slotmap::new_key_type;

new_key_type! {
    pub struct StructureId;
    pub struct ModelId;
    pub struct ChainId;
    pub struct ResidueId;
    pub struct AtomId;
}
