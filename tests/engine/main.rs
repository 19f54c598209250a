mod helpers;
mod recalculate_all;
mod shifts;
