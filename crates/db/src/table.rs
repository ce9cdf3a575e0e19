use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Trip {
    Table,
    Id,
    Name,
    StartDate,
    EndDate,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Location {
    Table,
    Id,
    TripId,
    Name,
    Description,
    Color,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Participant {
    Table,
    TripId,
    Email,
    Role,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum ItineraryDay {
    Table,
    Id,
    TripId,
    Day,
    PrimaryLocationId,
    TransferLocationId,
    Notes,
    Summary,
    UpdatedAt,
}
