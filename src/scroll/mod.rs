pub(crate) mod virtual_scroll;
