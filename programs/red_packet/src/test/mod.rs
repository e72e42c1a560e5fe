pub mod test_red_packet;
