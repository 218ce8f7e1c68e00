pub mod update_7_0_0;
