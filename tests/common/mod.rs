pub mod mock_pokeapi;
