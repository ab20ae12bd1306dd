/// Yields `(x, y)` pairs with `x` varying fastest.
pub fn row_major<Xs, Ys> (xs: Xs, ys: Ys)
    -> impl Iterator<Item = (Xs::Item, Ys::Item)>
where
    Xs: Iterator + Clone,
    Xs::Item: 'static,
    Ys: Iterator,
    Ys::Item: Clone + 'static,
{
    ys.flat_map(move |y| xs.clone().map(move |x| (x, y.clone())))
}

#[cfg(test)]
#[test]
fn row_major_order() {
    let order = row_major(0..3, 0..2).collect::<Vec<_>>();
    assert_eq!(order, [(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);

    assert_eq!(row_major(0..3, 0..0).count(), 0);
    assert_eq!(row_major(0..0, 0..3).count(), 0);
}
